use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Permissions: u32 {
        const READ = 0b0000_0001;
        const UPDATE = 0b0000_0010;
        const CREATE = 0b0000_0100;
        const DELETE = 0b0000_1000;
        const SHARE = 0b0001_0000;
    }
}

/// Permissions every trash entry ends up with. Entries in the trash can be
/// inspected, restored or purged, but never modified in place.
pub const TRASH_PERMISSIONS: Permissions = Permissions::READ.union(Permissions::DELETE);

pub fn normalize(_reported: Permissions) -> Permissions {
    TRASH_PERMISSIONS
}

#[cfg(test)]
mod test {
    #[test]
    fn normalize_ignores_reported_bits() {
        use super::{normalize, Permissions};

        for bits in 0..=u8::MAX as u32 {
            let permissions = normalize(Permissions::from_bits_retain(bits));

            assert_eq!(Permissions::READ | Permissions::DELETE, permissions);
            assert_eq!(9, permissions.bits());
        }
    }

    #[test]
    fn normalize_with_everything_reported() {
        use super::{normalize, Permissions};

        assert_eq!(super::TRASH_PERMISSIONS, normalize(Permissions::all()));
        assert_eq!(super::TRASH_PERMISSIONS, normalize(Permissions::empty()));
    }
}
