//! Runtime assembly of server stacks.

use parley_core::ChatConfig;

use crate::{
    AuthenticatingServer, BaseServer, CredentialStore, EncryptingServer, LoggingServer, ServerLayer,
};

/// Build the server layer stack selected by `config`.
///
/// Layers nest in canonical order, outermost first: logging, encryption,
/// authentication, base. Logging therefore records outcomes of decrypted,
/// authenticated traffic. `credentials` is ignored without authentication.
pub fn server_stack(config: &ChatConfig, credentials: CredentialStore) -> Box<dyn ServerLayer> {
    let mut layer: Box<dyn ServerLayer> = Box::new(BaseServer::new());

    if config.authentication {
        layer = Box::new(AuthenticatingServer::new(layer, credentials));
    }
    if let Some(method) = config.encryption {
        layer = Box::new(EncryptingServer::new(layer, method));
    }
    if config.logging {
        layer = Box::new(LoggingServer::new(layer));
    }

    tracing::debug!(features = ?config.features(), "assembled server stack");
    layer
}
