//! Main app runner

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{debug, warn};

use crate::application::ports::{ConfigStore, PresenterLauncher};
use crate::application::{Alert, AlertError, Delivery};
use crate::domain::alert::{is_bundle_id, ActivationRecord, NotificationRequest};
use crate::domain::config::AppConfig;
use crate::infrastructure::provision::ALERTER_PATH_ENV;
use crate::infrastructure::{resolve_alerter_path, AlerterLauncher, XdgConfigStore};

use super::args::AlertOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// How long alerter gets to exit after being closed
pub const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// Show one alert and print its activation
pub async fn run_alert(options: AlertOptions, config: AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();

    let explicit_path = options
        .alerter_path
        .clone()
        .or_else(|| config.alerter_path.as_ref().map(Into::into));

    let path = match resolve_alerter_path(explicit_path.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    debug!(path = %path.display(), "using alerter");

    let launcher = match AlerterLauncher::new(path) {
        Ok(launcher) => launcher,
        Err(e) => {
            presenter.error(&AlertError::from(e).to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let request = prepare_request(options.request, &config);
    if let Some(sender) = request.sender.as_deref() {
        if !is_bundle_id(sender) {
            presenter.warn(&format!(
                "Ignoring sender '{}': not an app bundle id (com.*)",
                sender
            ));
        }
    }

    let alert = Alert::new(request, launcher);

    let delivery = match alert.deliver().await {
        Ok(delivery) => delivery,
        Err(e @ AlertError::Validation(_)) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.start_spinner("Waiting for the notification to be dismissed...");
    let record = wait_for_activation(&alert, delivery, options.wait, CLOSE_GRACE).await;
    presenter.stop_spinner();

    if options.json {
        match serde_json::to_string(&record) {
            Ok(json) => presenter.output(&json),
            Err(e) => {
                presenter.error(&format!("Failed to encode activation: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        presenter.activation(&record);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Fill the request from merged configuration
///
/// The timeout always comes from the merged config, so an explicit
/// `--timeout 0` overrides a configured one.
pub fn prepare_request(mut request: NotificationRequest, config: &AppConfig) -> NotificationRequest {
    request.timeout = config.timeout_or_default();
    config.apply_to(&mut request);
    if request.title.is_none() {
        request.title = Some(env!("CARGO_PKG_NAME").to_string());
    }
    request
}

/// Wait for the delivery, closing the alert on timeout or Ctrl+C.
///
/// After closing, alerter gets `grace` to report before the empty record
/// is returned. A second Ctrl+C stops waiting at once.
pub async fn wait_for_activation<L>(
    alert: &Alert<L>,
    mut delivery: Delivery,
    wait: Option<Duration>,
    grace: Duration,
) -> ActivationRecord
where
    L: PresenterLauncher + 'static,
{
    let deadline = async {
        match wait {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        record = &mut delivery => return record,
        _ = deadline => debug!("wait expired, closing alert"),
        _ = tokio::signal::ctrl_c() => debug!("interrupted, closing alert"),
    }

    // The alert may have completed in the meantime
    if let Err(e) = alert.close().await {
        warn!(error = %e, "could not close alert");
    }

    tokio::select! {
        record = &mut delivery => record,
        _ = tokio::time::sleep(grace) => {
            warn!(?grace, "alerter did not exit after close");
            ActivationRecord::default()
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted again, not waiting for alerter");
            ActivationRecord::default()
        }
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        alerter_path: env::var(ALERTER_PATH_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Config values given on the command line
pub fn cli_config(alerter_path: Option<&Path>, timeout: Option<u32>) -> AppConfig {
    AppConfig {
        alerter_path: alerter_path.map(|p| p.to_string_lossy().into_owned()),
        timeout,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{InterruptRequests, LaunchError, PresenterProcess};
    use crate::domain::alert::{build_arguments, ActivationKind};
    use async_trait::async_trait;

    /// Presenter that stays open until closed, then reports a close.
    /// A stubborn one acknowledges the close but never exits.
    struct ClosingLauncher {
        stubborn: bool,
    }

    struct ClosingProcess {
        stubborn: bool,
    }

    #[async_trait]
    impl PresenterProcess for ClosingProcess {
        fn id(&self) -> Option<u32> {
            Some(77)
        }

        async fn wait_for_output(
            self: Box<Self>,
            mut interrupts: InterruptRequests,
        ) -> Result<Vec<u8>, LaunchError> {
            if let Some(reply) = interrupts.recv().await {
                let _ = reply.send(Ok(()));
            }
            if self.stubborn {
                std::future::pending::<()>().await;
            }
            Ok(br#"{"activationType":"closed"}"#.to_vec())
        }
    }

    #[async_trait]
    impl PresenterLauncher for ClosingLauncher {
        async fn launch(
            &self,
            _args: &[String],
        ) -> Result<Box<dyn PresenterProcess>, LaunchError> {
            Ok(Box::new(ClosingProcess {
                stubborn: self.stubborn,
            }))
        }
    }

    fn alert(stubborn: bool) -> Alert<ClosingLauncher> {
        Alert::new(
            NotificationRequest {
                message: "Hi".to_string(),
                ..Default::default()
            },
            ClosingLauncher { stubborn },
        )
    }

    #[tokio::test]
    async fn wait_expiry_closes_alert() {
        let alert = alert(false);

        let delivery = alert.deliver().await.unwrap();
        let record = wait_for_activation(
            &alert,
            delivery,
            Some(Duration::from_millis(20)),
            Duration::from_secs(5),
        )
        .await;
        assert_eq!(record.kind, Some(ActivationKind::Closed));
    }

    #[tokio::test]
    async fn stubborn_presenter_gives_up_after_grace() {
        let alert = alert(true);

        let delivery = alert.deliver().await.unwrap();
        let record = tokio::time::timeout(
            Duration::from_secs(5),
            wait_for_activation(
                &alert,
                delivery,
                Some(Duration::from_millis(20)),
                Duration::from_millis(50),
            ),
        )
        .await
        .expect("wait should be bounded by the grace period");
        assert!(record.is_empty());
    }

    #[test]
    fn cli_config_carries_path_and_timeout() {
        let config = cli_config(Some(Path::new("/opt/alerter")), Some(0));
        assert_eq!(config.alerter_path, Some("/opt/alerter".to_string()));
        assert_eq!(config.timeout, Some(0));

        let config = cli_config(None, None);
        assert!(config.alerter_path.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn default_config_adds_only_title() {
        let config = AppConfig::defaults().merge(AppConfig::empty());
        let request = prepare_request(
            NotificationRequest {
                message: "Hi".to_string(),
                ..Default::default()
            },
            &config,
        );

        assert_eq!(
            build_arguments(&request).unwrap(),
            vec!["-message", "Hi", "-title", env!("CARGO_PKG_NAME"), "-json"]
        );
    }

    #[test]
    fn explicit_zero_timeout_overrides_config() {
        let file = AppConfig {
            timeout: Some(30),
            ..Default::default()
        };
        let request = NotificationRequest {
            message: "Hi".to_string(),
            ..Default::default()
        };

        let merged = AppConfig::defaults()
            .merge(file.clone())
            .merge(cli_config(None, Some(0)));
        assert_eq!(prepare_request(request.clone(), &merged).timeout, 0);

        let merged = AppConfig::defaults()
            .merge(file)
            .merge(cli_config(None, None));
        assert_eq!(prepare_request(request, &merged).timeout, 30);
    }
}
