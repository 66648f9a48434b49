use partial::{AnyKeyPath, KeyPath, OptionalKeyPath, Partial, PartialError};
use static_assertions::{assert_impl_all, assert_not_impl_any};

#[derive(Clone)]
struct Shared {
    _name: String,
}

#[derive(Clone)]
struct Local {
    _count: std::rc::Rc<u32>,
}

assert_impl_all!(Partial<Shared>: Send, Sync, Clone, Default, std::fmt::Debug);
assert_impl_all!(Partial<Local>: Clone, Default);
assert_not_impl_any!(Partial<Local>: Send, Sync);

assert_impl_all!(KeyPath<Local, std::rc::Rc<u32>>: Copy, Send, Sync);
assert_impl_all!(OptionalKeyPath<Local, std::rc::Rc<u32>>: Copy, Send, Sync);
assert_impl_all!(AnyKeyPath: Copy, Send, Sync, Eq, Ord, std::hash::Hash);
assert_impl_all!(PartialError: std::error::Error, Send, Sync, Clone);
