use indexmap::IndexMap;

/// Version strings one source reported for one product.
///
/// Unordered and possibly containing duplicates; consumers treat it as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawVersionSet(Vec<String>);

impl RawVersionSet {
    pub fn new(versions: Vec<String>) -> Self {
        Self(versions)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RawVersionSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Sorted, de-duplicated pending versions for one (product, instance) pair.
///
/// Never zero-length: "nothing pending" is a single empty string so every
/// product still gets one (blank) display row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVersionList(Vec<String>);

impl PendingVersionList {
    /// Builds a list from versions already sorted and de-duplicated;
    /// an empty input becomes the placeholder.
    pub(crate) fn from_sorted(versions: Vec<String>) -> Self {
        if versions.is_empty() {
            Self::placeholder()
        } else {
            Self(versions)
        }
    }

    /// The single blank row used when nothing is pending
    pub fn placeholder() -> Self {
        Self(vec![String::new()])
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_empty()
    }

    /// Display rows, including the blank placeholder row
    pub fn rows(&self) -> &[String] {
        &self.0
    }

    /// Pending versions only; empty when this is the placeholder
    pub fn versions(&self) -> &[String] {
        if self.is_placeholder() {
            &self.0[..0]
        } else {
            &self.0[..]
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Row `index`, or an empty cell past the end
    pub fn row(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Pending versions for every reconciled product of one instance,
/// kept in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceReport {
    label: String,
    entries: IndexMap<String, PendingVersionList>,
}

impl InstanceReport {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: IndexMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn insert(&mut self, product: impl Into<String>, pending: PendingVersionList) {
        self.entries.insert(product.into(), pending);
    }

    pub fn get(&self, product: &str) -> Option<&PendingVersionList> {
        self.entries.get(product)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &PendingVersionList)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
