//! Scripted StyleAI session
//!
//! Walks through every screen on simulated devices and prints each rendered
//! shell as JSON on stdout. Logs go to stderr.

use anyhow::{bail, Context, Result};
use app_platform::capture::MediaKind;
use app_platform::share::ShareCapability;
use app_platform::simulated::{DeferringSurface, RecordingShareTarget, SimulatedCaptureBackend};
use app_state::gesture::SwipeDirection;
use app_ui::shell::MountedScreen;
use std::sync::Arc;
use std::time::Duration;
use style_ai::{AppConfig, AppShell, MockCatalog, Route};

const VIEWPORT_WIDTH: f32 = 390.0;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(err) = style_ai::logging::init_default() {
        eprintln!("logging disabled: {err}");
    }

    let config = Arc::new(
        AppConfig::from_env()
            .await
            .context("failed to load configuration")?,
    );
    let capture = Arc::new(SimulatedCaptureBackend::new());
    let share_target = Arc::new(RecordingShareTarget::new());

    let mut shell = AppShell::start(
        Arc::new(MockCatalog::new()),
        Arc::clone(&config),
        capture.clone(),
        ShareCapability::new(share_target.clone()),
    )
    .context("failed to start shell")?;

    run(&mut shell, &config).await?;

    shell.shutdown();
    if capture.live_tracks(MediaKind::Video) + capture.live_tracks(MediaKind::Audio) > 0 {
        bail!("capture tracks still live after shutdown");
    }
    tracing::info!(shares = share_target.shared().len(), "Session finished");
    Ok(())
}

fn print(shell: &AppShell) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&shell.render())?);
    Ok(())
}

async fn run(shell: &mut AppShell, config: &AppConfig) -> Result<()> {
    // Home: the first frame shows the camera starting
    print(shell)?;

    // Attach the camera feed once it connects and talk to the assistant
    let action = match shell.screen_mut() {
        MountedScreen::Home(home) => {
            home.settled().await;
            home.attach_video(Arc::new(DeferringSurface::new(1)));
            home.toggle_microphone();
            home.settled().await;
            home.analyze()
        }
        _ => bail!("expected the home screen"),
    };
    print(shell)?;

    // Color analysis runs to its result
    shell.dispatch(action)?;
    print(shell)?;
    let wait = config.analysis.positioning() + config.analysis.analyzing();
    tokio::time::sleep(wait + Duration::from_millis(50)).await;
    print(shell)?;

    let action = match shell.screen() {
        MountedScreen::ColorAnalysis(screen) => screen
            .start_browsing()
            .context("analysis did not reach a result")?,
        _ => bail!("expected the color analysis screen"),
    };
    shell.dispatch(action)?;

    // Discover: one dragged like, one rejected by button, then try on
    let action = match shell.screen_mut() {
        MountedScreen::Discover(discover) => {
            let index = discover.stack().current_index();
            discover.pointer_down(index);
            discover.pointer_move(index, VIEWPORT_WIDTH / 2.0 + 150.0, VIEWPORT_WIDTH);
            let outcome = discover.pointer_up(index);
            tracing::info!(?outcome, "Card swiped");
            discover.swipe(SwipeDirection::Left);
            discover.try_on_current()
        }
        _ => bail!("expected the discover screen"),
    };
    print(shell)?;
    if let Some(action) = action {
        shell.dispatch(action)?;
    }

    // Try-on: confirm and wait for the redirect back to discover
    if let MountedScreen::TryOn(try_on) = shell.screen_mut() {
        try_on.add_to_cart();
    }
    print(shell)?;
    tokio::time::sleep(config.try_on.redirect() + Duration::from_millis(50)).await;
    shell.pump()?;
    if *shell.current_route() != Route::Discover {
        bail!("try-on did not redirect to discover");
    }

    // Community and wrapped via the tab bar
    shell.open_path("/community")?;
    if let MountedScreen::Community(community) = shell.screen_mut() {
        community.toggle_like(1);
    }
    print(shell)?;

    shell.open_path("/wrapped")?;
    if let MountedScreen::Wrapped(wrapped) = shell.screen_mut() {
        while wrapped.view().show_next {
            wrapped.next();
        }
        let outcome = wrapped.share().await;
        tracing::info!(?outcome, "Wrapped shared");
    }
    print(shell)?;

    Ok(())
}
