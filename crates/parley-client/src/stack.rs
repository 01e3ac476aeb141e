//! Runtime assembly of client stacks.

use parley_core::ChatConfig;

use crate::{
    AuthenticatingClient, BaseClient, ClientLayer, ColoringClient, EncryptingClient,
    LoggingClient,
};

/// Build the client layer stack selected by `config`.
///
/// Outermost first: logging, encryption, authentication, coloring, base.
/// Logging sees arrivals before decryption; every other layer sees plain
/// text.
pub fn client_stack(config: &ChatConfig) -> Box<dyn ClientLayer> {
    let mut layer: Box<dyn ClientLayer> = Box::new(BaseClient);

    if config.color {
        layer = Box::new(ColoringClient::new(layer));
    }
    if config.authentication {
        layer = Box::new(AuthenticatingClient::new(layer));
    }
    if let Some(method) = config.encryption {
        layer = Box::new(EncryptingClient::new(layer, method));
    }
    if config.logging {
        layer = Box::new(LoggingClient::new(layer));
    }

    tracing::debug!(features = ?config.features(), "assembled client stack");
    layer
}
