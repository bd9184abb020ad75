use serde::{Deserialize, Serialize};
use std::fmt;

/// Value flowing between building blocks.
///
/// A container is either a single number or an ordered batch of containers of
/// any depth. Blocks never mutate a container in place; they build new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Container {
    Scalar(f64),
    Batch(Vec<Container>),
}

impl Container {
    pub fn scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    pub fn batch(items: impl IntoIterator<Item = Container>) -> Self {
        Self::Batch(items.into_iter().collect())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Batch(_) => None,
        }
    }

    /// Collects every scalar leaf, left to right, depth first
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<f64>) {
        match self {
            Self::Scalar(v) => out.push(*v),
            Self::Batch(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
        }
    }

    /// Recursive sum over all nesting levels
    pub fn sum(&self) -> f64 {
        match self {
            Self::Scalar(v) => *v,
            Self::Batch(items) => items.iter().map(Container::sum).sum(),
        }
    }

    /// Number of scalar leaves reachable from this container
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Batch(items) => items.iter().map(Container::leaf_count).sum(),
        }
    }
}

impl From<f64> for Container {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Container>> for Container {
    fn from(items: Vec<Container>) -> Self {
        Self::Batch(items)
    }
}

/// Scalars render as their numeric text, batches as `[a, b, ...]`
impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{}", v),
            Self::Batch(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}
