use super::*;

const CURRENT: &str = ".";
const PARENT: &str = "..";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RelativeToError {
    #[error("`{0}` and `{1}` have different anchors")]
    DifferentAnchors(Path, Path),
    #[error("`{0}` is not in the subpath of `{1}`")]
    NotASubpath(Path, Path),
    #[error("`{PARENT}` segment in `{0}` cannot be walked")]
    CannotWalk(Path),
}

impl PathRef {
    /// The path from `other` to this path.
    ///
    /// With `walk_up`,
    /// components of `other` not shared with this path
    /// are replaced with `..`.
    pub fn relative_to<P>(&self, other: P, walk_up: bool) -> Result<Path, RelativeToError>
    where
        P: AsRef<PathRef>,
    {
        let other = other.as_ref();
        let (anchor, mut names) = self.stack();
        let (other_anchor, mut other_names) = other.stack();
        if anchor != other_anchor {
            return Err(RelativeToError::DifferentAnchors(
                self.to_owned(),
                other.to_owned(),
            ));
        }
        pop_common(&mut names, &mut other_names);
        for name in other_names {
            if is_trivial(name) {
                continue;
            } else if !walk_up {
                return Err(RelativeToError::NotASubpath(
                    self.to_owned(),
                    other.to_owned(),
                ));
            } else if name == PARENT {
                return Err(RelativeToError::CannotWalk(other.to_owned()));
            } else {
                names.push(PARENT);
            }
        }
        Ok(Path::new(names.into_iter().rev()))
    }

    pub fn is_relative_to<P>(&self, other: P) -> bool
    where
        P: AsRef<PathRef>,
    {
        let (anchor, mut names) = self.stack();
        let (other_anchor, mut other_names) = other.as_ref().stack();
        if anchor != other_anchor {
            return false;
        }
        pop_common(&mut names, &mut other_names);
        other_names.into_iter().all(is_trivial)
    }
}

/// Remove components shared by both stacks,
/// starting from the root.
fn pop_common(names: &mut SmallVec<[&str; 8]>, other_names: &mut SmallVec<[&str; 8]>) {
    while let (Some(name), Some(other_name)) = (names.last(), other_names.last()) {
        if name != other_name {
            break;
        }
        names.pop();
        other_names.pop();
    }
}

fn is_trivial(name: &str) -> bool {
    name.is_empty() || name == CURRENT
}
