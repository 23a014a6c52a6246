use crate::node::Node;

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for crate::Node {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

/// A type that can be used to look into a [`Node`]: `usize` for sequence
/// positions, strings or nodes for mapping keys. See [`Node::get`].
///
/// This trait is sealed and cannot be implemented for types outside of
/// this crate.
pub trait Index: private::Sealed {
    /// Return None if the key or position is not present, or the node has the wrong shape.
    #[doc(hidden)]
    fn index_into<'v>(&self, v: &'v Node) -> Option<&'v Node>;

    #[doc(hidden)]
    fn index_into_mut<'v>(&self, v: &'v mut Node) -> Option<&'v mut Node>;
}

impl Index for usize {
    fn index_into<'v>(&self, v: &'v Node) -> Option<&'v Node> {
        match v {
            Node::Sequence(seq) => seq.get(*self),
            _ => None,
        }
    }

    fn index_into_mut<'v>(&self, v: &'v mut Node) -> Option<&'v mut Node> {
        match v {
            Node::Sequence(seq) => seq.get_mut(*self),
            _ => None,
        }
    }
}

impl Index for str {
    fn index_into<'v>(&self, v: &'v Node) -> Option<&'v Node> {
        v.as_mapping()?.get(self)
    }

    fn index_into_mut<'v>(&self, v: &'v mut Node) -> Option<&'v mut Node> {
        v.as_mapping_mut()?.get_mut(self)
    }
}

impl Index for String {
    fn index_into<'v>(&self, v: &'v Node) -> Option<&'v Node> {
        self.as_str().index_into(v)
    }

    fn index_into_mut<'v>(&self, v: &'v mut Node) -> Option<&'v mut Node> {
        self.as_str().index_into_mut(v)
    }
}

/// Compound keys: the mapping entry whose key is structurally equal.
impl Index for Node {
    fn index_into<'v>(&self, v: &'v Node) -> Option<&'v Node> {
        v.as_mapping()?.get(self)
    }

    fn index_into_mut<'v>(&self, v: &'v mut Node) -> Option<&'v mut Node> {
        v.as_mapping_mut()?.get_mut(self)
    }
}

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    fn index_into<'v>(&self, v: &'v Node) -> Option<&'v Node> {
        (**self).index_into(v)
    }

    fn index_into_mut<'v>(&self, v: &'v mut Node) -> Option<&'v mut Node> {
        (**self).index_into_mut(v)
    }
}
