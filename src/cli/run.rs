//! CLI command handlers for `run` and `config`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};

use crate::auth::ScriptedSdk;
use crate::config::SigninConfig;
use crate::error::Result;
use crate::session::{AuthSessionController, NullPresenter, Presenter, ScreenEvent, UiState};

use super::scenario::{Action, Scenario};
use super::terminal::TerminalPresenter;
use super::RunArgs;

/// What happened while a scenario played.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub events: Vec<ScreenEvent>,
    pub final_state: UiState,
    pub sdk_calls: Vec<&'static str>,
}

/// Play `scenario` against a [`ScriptedSdk`], waiting for the screen to
/// settle after every action.
pub async fn play_scenario(
    config: &SigninConfig,
    scenario: &Scenario,
    presenter: Box<dyn Presenter>,
) -> Result<ScenarioReport> {
    let sdk = Arc::new(ScriptedSdk::new(scenario.sdk.clone()));
    let controller = AuthSessionController::spawn(sdk.clone(), presenter, config);
    let mut events = controller.subscribe();
    let settle = scenario.settle_window();
    let mut seen = Vec::new();

    for action in &scenario.actions {
        tracing::info!(%action, "running scenario action");
        match action {
            Action::Resume => controller.resume_session_if_present()?,
            Action::Login => controller.start_interactive_login()?,
            Action::SignOut => controller.sign_out()?,
            Action::HostResumed => controller.host_resumed()?,
            Action::Wait(ms) => tokio::time::sleep(Duration::from_millis(*ms)).await,
        }
        drain_until_quiet(&mut events, settle, &mut seen).await;
    }

    let final_state = controller.state();
    controller.shutdown().await?;
    Ok(ScenarioReport {
        events: seen,
        final_state,
        sdk_calls: sdk.calls(),
    })
}

async fn drain_until_quiet(
    events: &mut broadcast::Receiver<ScreenEvent>,
    settle: Duration,
    seen: &mut Vec<ScreenEvent>,
) {
    loop {
        match tokio::time::timeout(settle, events.recv()).await {
            Ok(Ok(event)) => seen.push(event),
            Ok(Err(RecvError::Lagged(skipped))) => {
                tracing::warn!(skipped, "screen events dropped; raise event_buffer");
            }
            Ok(Err(RecvError::Closed)) | Err(_) => break,
        }
    }
}

/// Handle `signin run <scenario>`.
pub async fn handle_run(
    config: &SigninConfig,
    args: &RunArgs,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let scenario = Scenario::load(&args.scenario)?;

    let presenter: Box<dyn Presenter> = if args.json {
        Box::new(NullPresenter)
    } else {
        Box::new(TerminalPresenter::stdout())
    };
    let report = play_scenario(config, &scenario, presenter).await?;

    if args.json {
        for event in &report.events {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        println!("final state: {}", report.final_state.kind());
        println!("sdk calls: {}", report.sdk_calls.join(", "));
    }
    Ok(())
}

/// Handle `signin config`.
pub fn handle_config(config: &SigninConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
