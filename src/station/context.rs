//! Session context: the pallet that part scans are submitted against.

/// Current pallet identifier. Starts empty and is overwritten verbatim by
/// every pallet scan; part scans read whatever value is current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pallet: String,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pallet(&self) -> &str {
        &self.pallet
    }

    pub fn set_pallet(&mut self, pallet: impl Into<String>) {
        self.pallet = pallet.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        assert_eq!(SessionContext::new().pallet(), "");
    }

    #[test]
    fn set_pallet_overwrites_verbatim() {
        let mut ctx = SessionContext::new();
        ctx.set_pallet("PAL-1");
        ctx.set_pallet("  PAL-2 ");
        assert_eq!(ctx.pallet(), "  PAL-2 ");
    }
}
