//! Named, labeled axes
//!
//! An axis is a named vector of labels annotating one dimension of a cube.
//! It comes in two kinds with different alignment semantics:
//!
//! - [`AxisKind::Index`]: labels are pairwise distinct and positional lookup
//!   is backed by a hash table (built lazily on first use).
//! - [`AxisKind::Series`]: labels are arbitrary; lookups fall back to a
//!   linear scan.
//!
//! Axes are immutable after construction and cheap to share: the payload
//! lives behind an `Arc`, so cloning an axis or storing it in several cubes
//! never copies the labels.
//!
//! # Examples
//!
//! ```
//! use labcube_core::Axis;
//!
//! let quarter = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
//! assert_eq!(quarter.len(), 4);
//! assert_eq!(quarter.indexof(&"Q3".into()).unwrap(), 2);
//! ```

use crate::error::{CubeError, CubeResult};
use crate::label::Label;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// The two axis variants of the data model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    /// Unique labels with hash lookup.
    Index,
    /// Arbitrary labels, no lookup guarantee.
    Series,
}

struct AxisInner {
    name: String,
    kind: AxisKind,
    labels: Vec<Label>,
    // Lazily built lookup table for Index axes. This is the only interior
    // mutation in the library; OnceLock keeps it safe for shared axes.
    lookup: OnceLock<HashMap<Label, usize>>,
}

/// A named, labeled dimension.
#[derive(Clone)]
pub struct Axis {
    inner: Arc<AxisInner>,
}

impl Axis {
    /// Create an Index axis. Labels must be pairwise distinct.
    ///
    /// # Errors
    ///
    /// [`CubeError::UniquenessViolation`] on the first repeated label,
    /// [`CubeError::EmptyAxisName`] when `name` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::Axis;
    ///
    /// let year = Axis::index("year", [2014, 2015]).unwrap();
    /// assert!(year.is_index());
    ///
    /// assert!(Axis::index("year", [2014, 2014]).is_err());
    /// ```
    pub fn index<L, I>(name: impl Into<String>, labels: I) -> CubeResult<Self>
    where
        L: Into<Label>,
        I: IntoIterator<Item = L>,
    {
        let labels: Vec<Label> = labels.into_iter().map(Into::into).collect();
        let name = name.into();
        if name.is_empty() {
            return Err(CubeError::EmptyAxisName);
        }
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.clone()) {
                return Err(CubeError::UniquenessViolation {
                    axis: name,
                    label: label.clone(),
                });
            }
        }
        Ok(Self::from_parts(name, AxisKind::Index, labels))
    }

    /// Create a Series axis. Labels may repeat.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::Axis;
    ///
    /// let subject = Axis::series("subject", ["m", "b", "m"]).unwrap();
    /// assert!(!subject.is_index());
    /// assert_eq!(subject.len(), 3);
    /// ```
    pub fn series<L, I>(name: impl Into<String>, labels: I) -> CubeResult<Self>
    where
        L: Into<Label>,
        I: IntoIterator<Item = L>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(CubeError::EmptyAxisName);
        }
        let labels = labels.into_iter().map(Into::into).collect();
        Ok(Self::from_parts(name, AxisKind::Series, labels))
    }

    fn from_parts(name: String, kind: AxisKind, labels: Vec<Label>) -> Self {
        Self {
            inner: Arc::new(AxisInner {
                name,
                kind,
                labels,
                lookup: OnceLock::new(),
            }),
        }
    }

    /// Axis name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Axis kind tag.
    pub fn kind(&self) -> AxisKind {
        self.inner.kind
    }

    /// True for Index axes.
    pub fn is_index(&self) -> bool {
        self.inner.kind == AxisKind::Index
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.inner.labels.len()
    }

    /// True when the axis has no labels.
    pub fn is_empty(&self) -> bool {
        self.inner.labels.is_empty()
    }

    /// The label vector.
    pub fn labels(&self) -> &[Label] {
        &self.inner.labels
    }

    /// Whether two axis handles share the same payload.
    pub(crate) fn same(&self, other: &Axis) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Membership test by value.
    pub fn contains(&self, label: &Label) -> bool {
        match self.inner.kind {
            AxisKind::Index => self.lookup().contains_key(label),
            AxisKind::Series => self.inner.labels.contains(label),
        }
    }

    /// Position of a label on this axis.
    ///
    /// Index axes answer from the hash table; Series axes scan linearly and
    /// report the first occurrence.
    ///
    /// # Errors
    ///
    /// [`CubeError::LabelNotFound`] when the label is absent.
    pub fn indexof(&self, label: &Label) -> CubeResult<usize> {
        let found = match self.inner.kind {
            AxisKind::Index => self.lookup().get(label).copied(),
            AxisKind::Series => self.inner.labels.iter().position(|l| l == label),
        };
        found.ok_or_else(|| CubeError::LabelNotFound {
            axis: self.inner.name.clone(),
            label: label.clone(),
        })
    }

    /// Positions of several labels, one per query, failing on the first miss.
    pub fn positions(&self, query: &[Label]) -> CubeResult<Vec<usize>> {
        query.iter().map(|label| self.indexof(label)).collect()
    }

    /// Restrict the axis to the positions whose label occurs in `query`,
    /// preserving this axis's own order. Returns the restricted axis along
    /// with the positional selector to apply to value tensors.
    ///
    /// Every query label must be present on the axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use labcube_core::Axis;
    ///
    /// let q = Axis::index("quarter", ["Q1", "Q2", "Q3", "Q4"]).unwrap();
    /// let (kept, selector) = q.filter(&["Q3".into(), "Q1".into()]).unwrap();
    /// assert_eq!(selector, vec![0, 2]); // axis order, not query order
    /// assert_eq!(kept.labels()[0], "Q1".into());
    /// ```
    pub fn filter(&self, query: &[Label]) -> CubeResult<(Axis, Vec<usize>)> {
        for label in query {
            if !self.contains(label) {
                return Err(CubeError::LabelNotFound {
                    axis: self.inner.name.clone(),
                    label: label.clone(),
                });
            }
        }
        let wanted: HashSet<&Label> = query.iter().collect();
        let selector: Vec<usize> = self
            .inner
            .labels
            .iter()
            .enumerate()
            .filter_map(|(i, l)| wanted.contains(l).then_some(i))
            .collect();
        let axis = self.take(&selector)?;
        Ok((axis, selector))
    }

    /// Select the given positions in the given order, preserving the kind.
    ///
    /// # Errors
    ///
    /// [`CubeError::IndexOutOfRange`] for a position past the end and
    /// [`CubeError::UniquenessViolation`] when duplicates would enter an
    /// Index axis. Use [`Axis::take_demoting`] when demotion to a Series is
    /// the desired outcome instead.
    pub fn take(&self, positions: &[usize]) -> CubeResult<Axis> {
        let labels = self.gather(positions)?;
        match self.inner.kind {
            AxisKind::Index => Axis::index(self.inner.name.clone(), labels),
            AxisKind::Series => Axis::series(self.inner.name.clone(), labels),
        }
    }

    /// Like [`Axis::take`], but an Index axis that would acquire duplicate
    /// labels is demoted to a Series instead of failing.
    pub fn take_demoting(&self, positions: &[usize]) -> CubeResult<Axis> {
        let labels = self.gather(positions)?;
        if self.inner.kind == AxisKind::Index {
            let distinct: HashSet<&Label> = labels.iter().collect();
            if distinct.len() == labels.len() {
                return Axis::index(self.inner.name.clone(), labels);
            }
        }
        Axis::series(self.inner.name.clone(), labels)
    }

    /// Keep the positions where `mask` is true.
    ///
    /// # Errors
    ///
    /// [`CubeError::ShapeMismatch`] when the mask length differs from the
    /// axis length.
    pub fn compress(&self, mask: &[bool]) -> CubeResult<Axis> {
        let positions = self.mask_positions(mask)?;
        self.take(&positions)
    }

    /// Same-labels axis under a new name.
    pub fn rename(&self, new_name: impl Into<String>) -> CubeResult<Axis> {
        let name = new_name.into();
        if name.is_empty() {
            return Err(CubeError::EmptyAxisName);
        }
        Ok(Self::from_parts(
            name,
            self.inner.kind,
            self.inner.labels.clone(),
        ))
    }

    pub(crate) fn mask_positions(&self, mask: &[bool]) -> CubeResult<Vec<usize>> {
        if mask.len() != self.len() {
            return Err(CubeError::ShapeMismatch {
                expected: vec![self.len()],
                got: vec![mask.len()],
            });
        }
        Ok(mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect())
    }

    fn gather(&self, positions: &[usize]) -> CubeResult<Vec<Label>> {
        positions
            .iter()
            .map(|&p| {
                self.inner
                    .labels
                    .get(p)
                    .cloned()
                    .ok_or_else(|| CubeError::IndexOutOfRange {
                        axis: self.inner.name.clone(),
                        index: p,
                        len: self.len(),
                    })
            })
            .collect()
    }

    fn lookup(&self) -> &HashMap<Label, usize> {
        debug_assert_eq!(self.inner.kind, AxisKind::Index);
        self.inner.lookup.get_or_init(|| {
            self.inner
                .labels
                .iter()
                .enumerate()
                .map(|(i, l)| (l.clone(), i))
                .collect()
        })
    }
}

impl PartialEq for Axis {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
            || (self.inner.name == other.inner.name
                && self.inner.kind == other.inner.kind
                && self.inner.labels == other.inner.labels)
    }
}

impl Eq for Axis {}

impl fmt::Debug for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.inner.kind {
            AxisKind::Index => "Index",
            AxisKind::Series => "Series",
        };
        write!(f, "{}('{}', {:?})", kind, self.inner.name, self.inner.labels)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.inner.kind {
            AxisKind::Index => "Index",
            AxisKind::Series => "Series",
        };
        write!(f, "{}('{}', [", kind, self.inner.name)?;
        for (i, label) in self.inner.labels.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", label)?;
        }
        write!(f, "])")
    }
}
