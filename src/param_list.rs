use crate::compat::{BTreeMap, String, ToString, Vec, btree_map};
use crate::encoding::Encoding;
use crate::error::Result;
use crate::param::Param;
use crate::stream::StreamView;
use core::fmt::{self, Write};

/// Uniquely named query parameters, serialized in ascending name order.
///
/// Output depends only on the current entries and the [`Encoding`], never on
/// the order of `set` calls, so equal lists always encode to identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList {
    params: BTreeMap<String, Param>,
    encoding: Encoding,
}

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            params: BTreeMap::new(),
            encoding,
        }
    }

    /// Parse a query string (with or without leading `?`).
    ///
    /// `name` without `=` yields a value-less param, `name=` an empty value.
    /// Empty segments are skipped and a repeated name replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidPercentEncoding`](crate::ParamError::InvalidPercentEncoding)
    /// for malformed escapes and [`ParamError::InvalidName`](crate::ParamError::InvalidName)
    /// for segments with an empty name such as `=x`.
    pub fn parse(query: &str, encoding: Encoding) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut list = Self::with_encoding(encoding);

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let param = parse_pair(pair, encoding)
                .inspect_err(|err| tracing::debug!(pair, %err, "rejected query pair"))?;
            list.insert(param);
        }

        Ok(list)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Store a parameter, replacing any existing one with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidName`](crate::ParamError::InvalidName) if
    /// `name` is empty. The list is left untouched.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> Result<&Param> {
        let param = Param::new(name, value)?;
        tracing::trace!(name, has_value = value.is_some(), "parameter set");
        Ok(self.insert(param))
    }

    /// Remove the parameter named `name`, returning it if it was present.
    pub fn delete(&mut self, name: &str) -> Option<Param> {
        let removed = self.params.remove(name);
        tracing::trace!(name, found = removed.is_some(), "parameter deleted");
        removed
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Iterate in ascending name order. Call again to start over.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &Param> + DoubleEndedIterator {
        self.params.values()
    }

    /// Sorted params collected into a `Vec`
    pub fn to_vec(&self) -> Vec<&Param> {
        self.entries().collect()
    }

    /// Snapshot the current serialization as a rewindable byte view
    pub fn to_stream(&self) -> StreamView {
        let view = StreamView::new(self.to_string().into_bytes());
        tracing::debug!(size = view.size(), params = self.len(), "stream snapshot taken");
        view
    }

    fn insert(&mut self, param: Param) -> &Param {
        match self.params.entry(param.name().to_string()) {
            btree_map::Entry::Occupied(mut entry) => {
                entry.insert(param);
                entry.into_mut()
            }
            btree_map::Entry::Vacant(entry) => entry.insert(param),
        }
    }
}

fn parse_pair(pair: &str, encoding: Encoding) -> Result<Param> {
    let (name, value) = match memchr::memchr(b'=', pair.as_bytes()) {
        Some(pos) => (&pair[..pos], Some(&pair[pos + 1..])),
        None => (pair, None),
    };

    let name = encoding.decode(name)?;
    let value = value.map(|value| encoding.decode(value)).transpose()?;
    Param::from_owned(name, value)
}

impl fmt::Display for ParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, param) in self.entries().enumerate() {
            if i > 0 {
                f.write_char('&')?;
            }
            param.write_to(f, self.encoding)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a Param;
    type IntoIter = btree_map::Values<'a, String, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.values()
    }
}

impl Extend<Param> for ParamList {
    fn extend<T: IntoIterator<Item = Param>>(&mut self, iter: T) {
        for param in iter {
            self.insert(param);
        }
    }
}

impl FromIterator<Param> for ParamList {
    fn from_iter<T: IntoIterator<Item = Param>>(iter: T) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl From<&ParamList> for StreamView {
    fn from(list: &ParamList) -> Self {
        list.to_stream()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ParamError;

    #[test]
    fn test_empty() {
        let list = ParamList::new();
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "");
        assert_eq!(list.entries().count(), 0);
    }

    #[test]
    fn test_sorted_output() {
        let mut list = ParamList::new();
        list.set("Version", Some("2020-01-01")).unwrap();
        list.set("Action", Some("ListUsers")).unwrap();
        assert_eq!(list.to_string(), "Action=ListUsers&Version=2020-01-01");
    }

    #[test]
    fn test_set_returns_stored_param() {
        let mut list = ParamList::new();
        let param = list.set("a", Some("1")).unwrap();
        assert_eq!(param.name(), "a");
        assert_eq!(param.value(), Some("1"));
    }

    #[test]
    fn test_set_replaces() {
        let mut list = ParamList::new();
        list.set("a", Some("1")).unwrap();
        list.set("a", Some("2")).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.to_string(), "a=2");

        list.set("a", None).unwrap();
        assert_eq!(list.to_string(), "a");
    }

    #[test]
    fn test_set_empty_name() {
        let mut list = ParamList::new();
        list.set("a", Some("1")).unwrap();
        assert_eq!(list.set("", Some("x")).err(), Some(ParamError::InvalidName));
        assert_eq!(list.to_string(), "a=1");
    }

    #[test]
    fn test_delete() {
        let mut list = ParamList::new();
        list.set("a", Some("1")).unwrap();
        list.set("b", None).unwrap();

        let removed = list.delete("a").unwrap();
        assert_eq!(removed.value(), Some("1"));
        assert_eq!(list.delete("a"), None);
        assert_eq!(list.to_string(), "b");

        list.delete("b");
        assert!(list.is_empty());
    }

    #[test]
    fn test_entries_restartable() {
        let mut list = ParamList::new();
        for name in ["c", "a", "b"] {
            list.set(name, None).unwrap();
        }
        let first: Vec<&str> = list.entries().map(Param::name).collect();
        let second: Vec<&str> = list.entries().map(Param::name).collect();
        assert_eq!(first, ["a", "b", "c"]);
        assert_eq!(first, second);
        assert_eq!(list.to_vec().len(), 3);
    }

    #[test]
    fn test_form_encoding() {
        let mut list = ParamList::with_encoding(Encoding::FormUrlencoded);
        list.set("Name", Some("John Doe")).unwrap();
        assert_eq!(list.to_string(), "Name=John+Doe");
    }

    #[test]
    fn test_parse() {
        let list = ParamList::parse("?b=2&a&c=&&b=3", Encoding::Rfc3986).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get("a").unwrap().value(), None);
        assert_eq!(list.get("b").unwrap().value(), Some("3"));
        assert_eq!(list.get("c").unwrap().value(), Some(""));
        assert_eq!(list.to_string(), "a&b=3&c=");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            ParamList::parse("=x", Encoding::Rfc3986),
            Err(ParamError::InvalidName)
        );
        assert_eq!(
            ParamList::parse("a=%G1", Encoding::Rfc3986),
            Err(ParamError::InvalidPercentEncoding)
        );
    }

    #[test]
    fn test_to_stream_snapshot() {
        let mut list = ParamList::new();
        list.set("a", Some("1")).unwrap();
        let mut view = list.to_stream();
        list.set("b", Some("2")).unwrap();

        assert_eq!(view.size(), 3);
        assert_eq!(view.read(None), Some(&b"a=1"[..]));
    }
}
