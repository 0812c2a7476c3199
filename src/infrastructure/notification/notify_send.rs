//! Legacy daemon bridge using notify-send
//!
//! Each notification runs `notify-send --action default=Open --wait`,
//! which prints the invoked action key when the user clicks and exits
//! silently when the notification closes or expires.

use std::process::Stdio;

use tokio::process::Command;
use tokio::runtime::Handle;

use crate::application::ports::{
    BackendError, BackendEvent, ClickContext, EventSender, LegacyBridge, LegacyEventKind,
};
use crate::domain::config::{DEFAULT_APP_NAME, DEFAULT_LEGACY_COMMAND};
use crate::domain::notification::{NotificationId, NotificationRequest};

use super::probe;

/// notify-send legacy daemon bridge
pub struct NotifySendBridge {
    command: String,
    /// Application name registered with the daemon
    app_name: String,
    events: EventSender,
}

impl NotifySendBridge {
    /// Create a new bridge using `notify-send` from `PATH`
    pub fn new(events: EventSender) -> Self {
        Self::with_command(DEFAULT_LEGACY_COMMAND, events)
    }

    /// Create with a custom notify-send compatible command
    pub fn with_command(command: impl Into<String>, events: EventSender) -> Self {
        Self {
            command: command.into(),
            app_name: DEFAULT_APP_NAME.to_string(),
            events,
        }
    }

    fn build_args(&self, request: &NotificationRequest) -> Vec<String> {
        let mut args = vec![
            "--app-name".to_string(),
            self.app_name.clone(),
            "--icon".to_string(),
            request.icon().icon_name().to_string(),
            "--action".to_string(),
            "default=Open".to_string(),
            "--wait".to_string(),
            request.title().to_string(),
        ];

        let body = request.display_body();
        if !body.is_empty() {
            args.push(body);
        }

        args
    }
}

/// Action key printed by notify-send, if the user picked one
fn parse_action(stdout: &[u8]) -> Option<String> {
    let action = String::from_utf8_lossy(stdout).trim().to_string();
    (!action.is_empty()).then_some(action)
}

async fn invoke(command: &str, args: &[String]) -> Result<Option<String>, BackendError> {
    let output = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BackendError::CommandNotFound(command.to_string())
            } else {
                BackendError::SendFailed(e.to_string())
            }
        })?;

    if !output.status.success() {
        return Err(BackendError::SendFailed(format!(
            "{} exited with status: {}",
            command, output.status
        )));
    }

    Ok(parse_action(&output.stdout))
}

async fn run_notify(
    id: NotificationId,
    command: String,
    args: Vec<String>,
    context: ClickContext,
    events: EventSender,
) {
    let kind = match invoke(&command, &args).await {
        Ok(Some(action)) => {
            tracing::debug!(%id, %action, "Legacy notification clicked");
            LegacyEventKind::Clicked
        }
        Ok(None) => LegacyEventKind::TimedOut,
        Err(e) => {
            tracing::warn!(%id, error = %e, "Failed to show legacy notification");
            LegacyEventKind::TimedOut
        }
    };

    let _ = events.send(BackendEvent::legacy(kind, context));
}

impl LegacyBridge for NotifySendBridge {
    fn register_application(&mut self, app_name: &str) {
        self.app_name = app_name.to_string();
        tracing::debug!(app_name, command = %self.command, "Registered with legacy daemon");
    }

    fn is_reachable(&self) -> bool {
        probe::is_command_available(&self.command)
    }

    fn notify(&self, id: NotificationId, request: &NotificationRequest, context: ClickContext) {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(%id, "Legacy bridge needs a Tokio runtime");
            let _ = self
                .events
                .send(BackendEvent::legacy(LegacyEventKind::TimedOut, context));
            return;
        };

        let args = self.build_args(request);
        runtime.spawn(run_notify(
            id,
            self.command.clone(),
            args,
            context,
            self.events.clone(),
        ));
    }
}
