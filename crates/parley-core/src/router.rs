//! In-process network simulator.
//!
//! The router stands in for real transport. Delivery is a direct,
//! synchronous call into the receiver, which may itself send further
//! messages before returning. Call depth is therefore bounded by the number
//! of reply hops times the number of layers each hop passes through.
//!
//! # Invariants
//!
//! - Addresses are assigned in strictly increasing order starting at 0 and are
//!   never reused, even after a participant is dropped
//! - No registry borrow is held while a participant handles a message, so
//!   handlers may re-enter the router freely

use std::{
    cell::{Cell, OnceCell, RefCell},
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
};

use parley_proto::{Address, Message};

use crate::{ChatError, MessageFactory};

/// Write-once address of a participant.
///
/// Empty until the router registers the participant, fixed afterwards.
#[derive(Default)]
pub struct AddressSlot(OnceCell<Address>);

impl AddressSlot {
    /// Create an unbound slot.
    pub fn new() -> Self {
        Self(OnceCell::new())
    }

    /// Bound address, or `None` before registration.
    pub fn try_get(&self) -> Option<Address> {
        self.0.get().copied()
    }

    /// Bound address.
    ///
    /// # Panics
    ///
    /// Reading the address before the participant has been registered is a
    /// programming error and panics.
    #[allow(clippy::expect_used)]
    pub fn get(&self) -> Address {
        self.try_get().expect("participant address read before registration")
    }

    /// Bind the address. Returns `false` if the slot was already bound, in
    /// which case the original address is kept.
    pub fn bind(&self, address: Address) -> bool {
        self.0.set(address).is_ok()
    }
}

impl fmt::Debug for AddressSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_get() {
            Some(address) => write!(f, "AddressSlot({address})"),
            None => f.write_str("AddressSlot(<unbound>)"),
        }
    }
}

/// Capability every server and client exposes to the router.
pub trait Participant {
    /// Slot the router binds the participant's address into.
    fn address_slot(&self) -> &AddressSlot;

    /// Handle a delivered message.
    ///
    /// Returns whether the message was accepted. Expected rejections are
    /// `Ok(false)`; `Err` is reserved for fatal conditions raised while
    /// handling, such as a nested send to an unknown receiver.
    fn handle_message(&self, message: Message) -> Result<bool, ChatError>;
}

/// Router configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterConfig {
    /// Pass every delivered message through the CBOR codec, simulating a
    /// trip over the wire.
    pub wire_codec: bool,
}

/// In-process message router.
pub struct Router {
    config: RouterConfig,
    next_address: Cell<Address>,
    participants: RefCell<BTreeMap<Address, Weak<dyn Participant>>>,
}

impl Router {
    /// Create a router with direct delivery.
    pub fn new() -> Rc<Self> {
        Self::with_config(RouterConfig::default())
    }

    /// Create a router with the given configuration.
    pub fn with_config(config: RouterConfig) -> Rc<Self> {
        Rc::new(Self {
            config,
            next_address: Cell::new(0),
            participants: RefCell::new(BTreeMap::new()),
        })
    }

    /// Register a participant and bind its address.
    ///
    /// The router only keeps a weak reference; the caller owns the
    /// participant. Registering an already bound participant is a no-op that
    /// returns its existing address.
    pub fn register<P: Participant + 'static>(&self, participant: &Rc<P>) -> Address {
        if let Some(existing) = participant.address_slot().try_get() {
            tracing::warn!(address = existing, "participant already registered");
            return existing;
        }

        let address = self.next_address.get();
        self.next_address.set(address + 1);
        participant.address_slot().bind(address);

        let weak: Weak<dyn Participant> = Rc::downgrade(participant) as Weak<dyn Participant>;
        self.participants.borrow_mut().insert(address, weak);

        tracing::debug!(address, "registered participant");
        address
    }

    /// Number of live participants.
    pub fn participant_count(&self) -> usize {
        self.participants.borrow().values().filter(|p| p.strong_count() > 0).count()
    }

    /// Deliver `message` to `receiver` and return whether it was accepted.
    ///
    /// # Errors
    ///
    /// - `UnknownReceiver` if nothing is bound to `receiver` (or it was
    ///   dropped)
    /// - `Codec` if wire simulation is enabled and the message fails to
    ///   round-trip
    /// - any fatal error raised by the receiver while handling
    pub fn send_message(&self, receiver: Address, message: Message) -> Result<bool, ChatError> {
        let participant = self.lookup(receiver)?;

        let message = if self.config.wire_codec {
            let bytes = message.encode()?;
            Message::decode(&bytes)?
        } else {
            message
        };

        tracing::trace!(receiver, sender = message.sender(), kind = %message.kind(), "deliver");
        participant.handle_message(message)
    }

    fn lookup(&self, receiver: Address) -> Result<Rc<dyn Participant>, ChatError> {
        let mut participants = self.participants.borrow_mut();
        let entry = participants.get(&receiver).map(Weak::upgrade);

        match entry {
            Some(Some(participant)) => Ok(participant),
            Some(None) => {
                participants.remove(&receiver);
                tracing::warn!(receiver, "receiver was dropped");
                Err(ChatError::UnknownReceiver(receiver))
            },
            None => {
                tracing::warn!(receiver, "unknown receiver");
                Err(ChatError::UnknownReceiver(receiver))
            },
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("next_address", &self.next_address.get())
            .field("participants", &self.participants.borrow().len())
            .finish()
    }
}

/// Everything a participant needs to talk to the network.
///
/// Owns the participant's write-once address, a weak handle to the router
/// it lives on, and the outbound message factory chain.
pub struct Endpoint {
    address: AddressSlot,
    router: Weak<Router>,
    factory: Rc<dyn MessageFactory>,
}

impl Endpoint {
    /// Create an endpoint on `router` building messages with `factory`.
    pub fn new(router: &Rc<Router>, factory: Rc<dyn MessageFactory>) -> Self {
        Self { address: AddressSlot::new(), router: Rc::downgrade(router), factory }
    }

    /// Address slot bound at registration.
    pub fn address_slot(&self) -> &AddressSlot {
        &self.address
    }

    /// Own address.
    ///
    /// # Panics
    ///
    /// Panics if the owning participant has not been registered yet.
    pub fn address(&self) -> Address {
        self.address.get()
    }

    /// Outbound message factory chain.
    pub fn factory(&self) -> &dyn MessageFactory {
        self.factory.as_ref()
    }

    /// Send a fully built message to `receiver`.
    pub fn send(&self, receiver: Address, message: Message) -> Result<bool, ChatError> {
        let router = self.router.upgrade().ok_or(ChatError::NetworkUnavailable)?;
        router.send_message(receiver, message)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").field("address", &self.address).finish_non_exhaustive()
    }
}
