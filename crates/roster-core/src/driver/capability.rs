/// The SQL dialect a connection speaks.
#[derive(Debug)]
pub struct Capability {
    /// Identifier quoting, placeholder syntax and column types
    pub flavor: Flavor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Sqlite,
}

impl Capability {
    pub const SQLITE: Self = Self {
        flavor: Flavor::Sqlite,
    };
}
