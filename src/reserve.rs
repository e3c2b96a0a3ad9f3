use crate::SimpleVector;

/// Capacity request selecting the reserving constructor of [`SimpleVector`].
///
/// Built with [`reserve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReserveProxy {
	capacity: usize
}

impl ReserveProxy {
	#[inline]
	pub const fn new(capacity: usize) -> Self {
		ReserveProxy { capacity }
	}

	/// Requested capacity.
	#[inline]
	pub const fn capacity(&self) -> usize {
		self.capacity
	}
}

/// Creates a capacity request to pass to [`SimpleVector::with_reserve`] or `From`.
///
/// # Example
/// ```
/// # use simple_vector::{reserve, SimpleVector};
/// let v: SimpleVector<u32> = reserve(16).into();
/// assert!(v.is_empty());
/// assert_eq!(v.capacity(), 16);
/// ```
#[inline]
pub const fn reserve(capacity: usize) -> ReserveProxy {
	ReserveProxy::new(capacity)
}

impl<T> From<ReserveProxy> for SimpleVector<T> {
	#[inline]
	fn from(proxy: ReserveProxy) -> SimpleVector<T> {
		SimpleVector::with_reserve(proxy)
	}
}
