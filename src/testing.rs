use once_cell::sync::Lazy;
use proptest::prelude::*;

use crate::{Path, SEPARATOR};

/// Unnormalized paths,
/// with runs of separators
/// and `.` and `..` components.
pub(crate) static RAW_PATH: Lazy<String> = Lazy::new(|| format!(r"[ab.{SEPARATOR}]{{0,12}}"));

pub(crate) fn path(s: &str) -> Path {
    Path::new([s])
}

impl Arbitrary for Path {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<bool>(), RAW_PATH.as_str())
            .prop_map(|(anchored, s)| {
                if anchored {
                    Path::anchor().join(s)
                } else {
                    Path::new([s])
                }
            })
            .boxed()
    }
}
