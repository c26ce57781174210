/// The slice of the preview1 errno vocabulary the shim ever reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    /// `__WASI_ERRNO_SUCCESS`
    Success,
    /// `__WASI_ERRNO_BADF`: the descriptor is neither stdout nor stderr.
    BadF,
    /// `__WASI_ERRNO_NOTSUP`: the descriptor exists but the operation does
    /// not apply to a character device.
    NotSup,
}

impl Errno {
    /// Raw value as the guest's `errno` type sees it.
    pub const fn raw(self) -> i32 {
        match self {
            Errno::Success => 0,
            Errno::BadF => 8,
            Errno::NotSup => 58,
        }
    }
}

impl From<Errno> for i32 {
    fn from(errno: Errno) -> i32 {
        errno.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_match_preview1() {
        assert_eq!(Errno::Success.raw(), 0);
        assert_eq!(Errno::BadF.raw(), 8);
        assert_eq!(Errno::NotSup.raw(), 58);
    }
}
