//! App runners for the post and probe commands

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::application::ports::{
    event_channel, ActivationEvent, ConfigStore, EventReceiver, LegacyBridge, NativeCenter,
    RawBackendEvent,
};
use crate::application::{Dispatch, EventOutcome, NotificationRouter};
use crate::domain::config::AppConfig;
use crate::domain::notification::{select_backend, NotificationRequest, ShowPolicy, ALL_POLICIES};
use crate::infrastructure::{create_backends, BackendSelection, XdgConfigStore};

use super::args::{BackendArgs, PostArgs};
use super::presenter::{yes_no, Presenter};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
pub const EXIT_UNAVAILABLE: u8 = 3;

/// Environment overrides
pub const ENV_SHOW_POLICY: &str = "NOTIFY_ROUTER_SHOW_POLICY";
pub const ENV_APP_NAME: &str = "NOTIFY_ROUTER_APP_NAME";

/// How long a non-waiting post lingers so the backend can show it
const DELIVERY_GRACE: Duration = Duration::from_secs(2);

type HostRouter = NotificationRouter<Box<dyn NativeCenter>, Box<dyn LegacyBridge>>;

/// How waiting on a posted notification ended
#[derive(Debug, Clone, PartialEq)]
enum WaitResult {
    Activated(Value),
    Dismissed,
    Delivered,
    TimedOut,
    Interrupted,
    Closed,
}

/// Post one notification and report what the user did with it
pub async fn run_post(args: PostArgs) -> ExitCode {
    let mut presenter = Presenter::new();

    let request = match build_request(&args) {
        Ok(request) => request,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let config = load_merged_config(post_cli_config(&args)).await;
    let (events_tx, mut events) = event_channel();
    let (native, legacy) = create_backends(&config, selection(args.backends), events_tx);
    let mut router: HostRouter = NotificationRouter::new(native, legacy, config.router_config());

    let (activated_tx, mut activated) = oneshot::channel();
    let dispatch = match router.post_with_handler(request, move |event| {
        let _ = activated_tx.send(activation_report(event));
    }) {
        Ok(dispatch) => dispatch,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_UNAVAILABLE);
        }
    };

    presenter.success(&format!(
        "Posted {} via {} backend",
        dispatch.id, dispatch.backend
    ));

    let wait = config.wait_or_default();
    let result = if wait == 0 {
        wait_for(
            &mut router,
            &mut events,
            &mut activated,
            dispatch,
            DELIVERY_GRACE,
            true,
            &presenter,
        )
        .await
    } else {
        presenter.start_spinner(&presenter.format_wait(dispatch.backend, wait));
        let result = wait_for(
            &mut router,
            &mut events,
            &mut activated,
            dispatch,
            Duration::from_secs(wait),
            false,
            &presenter,
        )
        .await;
        presenter.stop_spinner();
        result
    };

    match result {
        WaitResult::Activated(report) => {
            presenter.success("Notification activated");
            presenter.output(&report.to_string());
            ExitCode::from(EXIT_SUCCESS)
        }
        WaitResult::Dismissed => {
            presenter.info("Notification dismissed");
            ExitCode::from(EXIT_SUCCESS)
        }
        WaitResult::Delivered => ExitCode::from(EXIT_SUCCESS),
        WaitResult::TimedOut => {
            if wait > 0 {
                presenter.warn(&format!("No activation within {}s", wait));
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        WaitResult::Interrupted => {
            presenter.warn("Interrupted");
            ExitCode::from(EXIT_ERROR)
        }
        WaitResult::Closed => {
            presenter.error("Notification backends stopped reporting");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print host capabilities and the backend every policy would pick
pub async fn run_probe(backends: BackendArgs) -> ExitCode {
    let presenter = Presenter::new();
    let config = load_merged_config(AppConfig::empty()).await;

    // Probing never posts, so nothing reads the channel
    let (events_tx, _events) = event_channel();
    let (native, legacy) = create_backends(&config, selection(backends), events_tx);

    let native_available = native.is_available();
    let legacy_reachable = legacy.is_reachable();

    presenter.key_value("native center available", yes_no(native_available));
    presenter.key_value(
        &format!("legacy daemon reachable ({})", config.legacy_command_or_default()),
        yes_no(legacy_reachable),
    );
    presenter.key_value("configured policy", config.show_policy_or_default().as_str());

    for policy in ALL_POLICIES {
        let choice = select_backend(*policy, native_available, legacy_reachable)
            .map(|backend| backend.to_string())
            .unwrap_or_else(|| "none".to_string());
        presenter.key_value(&format!("policy {}", policy), &choice);
    }

    ExitCode::from(EXIT_SUCCESS)
}

async fn wait_for(
    router: &mut HostRouter,
    events: &mut EventReceiver,
    activated: &mut oneshot::Receiver<Value>,
    dispatch: Dispatch,
    limit: Duration,
    until_delivered: bool,
    presenter: &Presenter,
) -> WaitResult {
    let deadline = Instant::now() + limit;
    let timeout = tokio::time::sleep_until(deadline);
    tokio::pin!(timeout);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    return WaitResult::Closed;
                };
                match router.handle_event(event) {
                    EventOutcome::Activated { id, .. } if id == dispatch.id => {
                        return WaitResult::Activated(activated.try_recv().unwrap_or(Value::Null));
                    }
                    EventOutcome::Dismissed { id } if id == dispatch.id => {
                        return WaitResult::Dismissed;
                    }
                    EventOutcome::Delivered { id, removed } if id == dispatch.id => {
                        tracing::debug!(%id, removed, "Delivery confirmed");
                        if until_delivered {
                            return WaitResult::Delivered;
                        }
                    }
                    outcome => tracing::debug!(?outcome, "Backend event handled"),
                }
            }
            _ = &mut timeout => return WaitResult::TimedOut,
            _ = &mut ctrl_c => return WaitResult::Interrupted,
            _ = ticker.tick() => {
                let remaining = deadline.saturating_duration_since(Instant::now()).as_secs();
                presenter.update_spinner(&presenter.format_wait(dispatch.backend, remaining));
            }
        }
    }
}

/// JSON line printed for an activation
pub fn activation_report(event: &ActivationEvent) -> Value {
    let action = match event.raw() {
        RawBackendEvent::Native(notification) => notification.action.clone(),
        RawBackendEvent::Legacy(_) => None,
    };

    json!({
        "id": event.id().to_string(),
        "backend": event.raw().backend().to_string(),
        "title": event.request().title(),
        "identifier": event.request().identifier(),
        "action": action,
        "payload": event.request().payload(),
    })
}

fn build_request(args: &PostArgs) -> Result<NotificationRequest, String> {
    let mut request = NotificationRequest::new(args.title.clone());

    if let Some(ref subtitle) = args.subtitle {
        request = request.with_subtitle(subtitle.clone());
    }
    if let Some(ref body) = args.body {
        request = request.with_body(body.clone());
    }
    if let Some(icon) = args.icon {
        request = request.with_icon(icon.into());
    }
    if let Some(ref payload) = args.payload {
        let payload: Value = serde_json::from_str(payload)
            .map_err(|e| format!("Invalid --payload JSON: {}", e))?;
        request = request.with_payload(payload);
    }

    Ok(request)
}

fn selection(backends: BackendArgs) -> BackendSelection {
    BackendSelection {
        native: !backends.no_native,
        legacy: !backends.no_legacy,
    }
}

/// Config layer built from post flags
fn post_cli_config(args: &PostArgs) -> AppConfig {
    AppConfig {
        show_policy: args
            .policy
            .map(|p| ShowPolicy::from(p).as_str().to_string()),
        auto_remove_delivered: args.auto_remove.then_some(true),
        wait: args.wait,
        ..Default::default()
    }
}

/// Config layer built from environment variables
fn env_config() -> AppConfig {
    AppConfig {
        show_policy: env::var(ENV_SHOW_POLICY).ok().filter(|s| !s.is_empty()),
        app_name: env::var(ENV_APP_NAME).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Merge: defaults < file < env < cli
fn merge_layers(file: AppConfig, env: AppConfig, cli: AppConfig) -> AppConfig {
    AppConfig::defaults().merge(file).merge(env).merge(cli)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    let config = merge_layers(file_config, env_config(), cli_config);

    if let Some(ref policy) = config.show_policy {
        if let Err(e) = policy.parse::<ShowPolicy>() {
            tracing::warn!(error = %e, "Falling back to the default show policy");
        }
    }

    config
}
