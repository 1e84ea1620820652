//! Index newtypes into the program tables.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident($repr:ty)) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $repr);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn from_index(index: usize) -> Self {
                Self::try_from_index(index).expect("program table index overflow")
            }

            /// `None` when `index` does not fit the id type.
            #[inline]
            pub fn try_from_index(index: usize) -> Option<Self> {
                <$repr>::try_from(index).ok().map(Self)
            }

            /// Number of distinct ids the type can hold.
            pub const LIMIT: usize = (<$repr>::MAX as usize).saturating_add(1);
        }
    };
}

define_id!(
    /// Node or token kind. Doubles as the rowan raw kind.
    KindId(u16)
);
define_id!(
    /// Rule, in grammar definition order.
    RuleId(u32)
);
define_id!(
    /// Op in the program's op arena.
    OpId(u32)
);
define_id!(
    /// Interned terminal matcher.
    TerminalId(u32)
);

impl KindId {
    /// `ERROR` nodes wrapping skipped or missing input.
    pub const ERROR: KindId = KindId(0);
    /// Raw text skipped by error recovery.
    pub const SKIPPED: KindId = KindId(1);
}
