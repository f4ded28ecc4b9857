//! Shared handles for every workflow

use std::sync::Arc;

use shared::row::{SheetEntry, SheetRow, parse_rows};

use crate::clock::{Clock, SystemClock};
use crate::config::SheetRef;
use crate::http::{NetworkSheetClient, SheetApi};
use crate::{ClientConfig, ClientResult};

/// Endpoint, configuration and time source used by the workflows
#[derive(Clone)]
pub struct SheetContext {
    pub api: Arc<dyn SheetApi>,
    pub config: Arc<ClientConfig>,
    pub clock: Arc<dyn Clock>,
}

impl SheetContext {
    pub fn new(api: Arc<dyn SheetApi>, config: ClientConfig) -> Self {
        Self {
            api,
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Context talking to the configured endpoint over HTTP
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let api = NetworkSheetClient::new(&config)?;
        tracing::info!(endpoint = %api.endpoint_url(), "Sheet endpoint configured");
        Ok(Self::new(Arc::new(api), config))
    }

    /// Fetch a sheet and map its data rows into `R`
    pub async fn load<R: SheetRow>(&self, sheet: &SheetRef) -> ClientResult<Vec<SheetEntry<R>>> {
        let rows = self.api.fetch(&sheet.name).await?;
        let entries = parse_rows::<R>(&sheet.name, &rows, sheet.header_row, self.config.header_check)?;
        tracing::debug!(sheet = %sheet.name, rows = rows.len(), records = entries.len(), "Loaded sheet");
        Ok(entries)
    }
}

impl std::fmt::Debug for SheetContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetContext")
            .field("endpoint_url", &self.config.endpoint_url)
            .field("now", &self.clock.now())
            .finish()
    }
}
