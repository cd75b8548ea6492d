use super::Serializer;

use quarry_core::driver::{Capability, Dialect};

#[derive(Debug, Clone, Copy)]
pub(super) enum Flavor {
    Sqlite,
    Mysql,
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
        }
    }

    pub fn for_dialect(dialect: Dialect) -> Serializer {
        match dialect {
            Dialect::Sqlite => Serializer::sqlite(),
            Dialect::Mysql => Serializer::mysql(),
        }
    }

    pub fn for_capability(capability: &Capability) -> Serializer {
        Serializer::for_dialect(capability.dialect)
    }
}
