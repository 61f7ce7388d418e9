use super::Serializer;

use roster_core::driver::{Capability, Flavor};

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    /// The serializer matching a connection's dialect.
    pub fn for_capability(capability: &Capability) -> Serializer {
        Serializer {
            flavor: capability.flavor,
        }
    }
}
