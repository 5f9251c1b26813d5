//! Internal helper macros.

/// Returns early with the given error when the predicate does not hold.
///
/// Works like `assert!`, except that it returns `Err($error)` instead of panicking.
/// The decoder uses it to enforce header block limits:
///
/// ```ignore
/// ensure!(count <= self.max_header_num, ParseError::too_many_headers(self.max_header_num));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
