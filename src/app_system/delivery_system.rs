use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

use super::{AppService, AppSettings};
use crate::clients::{AppClient, DeliveryBackend};
use crate::error::AppError;
use crate::queries::Queries;
use crate::view::View;

/// Starts the application actor over a backend and tears it down again.
pub struct DeliverySystem {
    pub client: AppClient,
    pub view: View,
    handles: Vec<JoinHandle<()>>,
}

impl DeliverySystem {
    #[instrument(name = "delivery_system", skip(backend))]
    pub fn start<B: DeliveryBackend>(backend: B, settings: AppSettings) -> Self {
        info!("Starting delivery client");

        let view = View::new();
        let queries = Queries::new(Arc::new(backend), view.clone());
        let (service, client) = AppService::new(32, queries, settings);
        let handles = vec![tokio::spawn(service.run())];

        info!("Delivery client started");
        Self { client, view, handles }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), AppError> {
        info!("Shutting down delivery client");

        let _ = self.client.shutdown().await;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(AppError::TaskFailed(e.to_string()));
            }
        }

        info!("Delivery client shutdown complete");
        Ok(())
    }
}
