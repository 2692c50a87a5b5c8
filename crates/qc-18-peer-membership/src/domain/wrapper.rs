//! Deep-copying owner for trait objects.
//!
//! `Polymorphic<dyn Trait>` owns its value exclusively. Cloning asks the
//! value for an independent copy through [`ClonePolymorphic`]; moving hands
//! the box over without copying. Two wrappers never alias one value.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Capability to produce an owned deep copy, usable on unsized types.
///
/// Implement it for `dyn YourTrait` by forwarding to a boxed-clone method on
/// the trait.
pub trait ClonePolymorphic {
    fn clone_polymorphic(&self) -> Box<Self>;
}

/// Exclusively owned, deep-cloned polymorphic value.
pub struct Polymorphic<T: ?Sized> {
    inner: Box<T>,
}

impl<T: ?Sized> Polymorphic<T> {
    pub fn from_box(inner: Box<T>) -> Self {
        Self { inner }
    }

    pub fn into_box(self) -> Box<T> {
        self.inner
    }
}

impl<T: ?Sized + ClonePolymorphic> Clone for Polymorphic<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_polymorphic(),
        }
    }
}

impl<T: ?Sized> Deref for Polymorphic<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: ?Sized> DerefMut for Polymorphic<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: ?Sized> From<Box<T>> for Polymorphic<T> {
    fn from(inner: Box<T>) -> Self {
        Self::from_box(inner)
    }
}

/// Compares the wrapped values, not the boxes.
impl<T: ?Sized + PartialEq> PartialEq for Polymorphic<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.inner == *other.inner
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Polymorphic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Polymorphic").field(&&*self.inner).finish()
    }
}
