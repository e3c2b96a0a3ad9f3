use core::{
	ops::{
		Deref,
		DerefMut
	},
	ptr,
	mem,
	fmt,
	cmp::{
		self,
		Ordering
	},
	hash::{
		Hash,
		Hasher
	},
	iter::FusedIterator
};
use crate::{
	error::{
		Error,
		Result
	},
	raw::{
		RawBuffer,
		handle_reserve,
		capacity_overflow
	},
	reserve::ReserveProxy
};

/// Contiguous growable array type with explicit size/capacity bookkeeping.
///
/// The elements live in a [`RawBuffer`] exclusively owned by the vector.
/// The first `len` slots of the buffer are initialized, the remaining
/// `capacity - len` slots are unspecified.
///
/// When a push or an insertion finds the buffer full, the capacity grows to
/// `max(len + 1, 2 * capacity)`, so a vector of capacity `0` grows to `1`, then `2`, `4`, etc.
/// Explicit reservations ([`SimpleVector::reserve`]) grow the buffer to exactly the requested capacity.
/// The capacity is never reduced by removing elements.
///
/// # Invalidation
///
/// Pointers obtained through [`as_ptr`](#method.as_ptr) (or slices and iterators borrowed from the vector)
/// are invalidated by any operation that moves the buffer (growth beyond the capacity)
/// or shifts the elements (insertion and removal).
/// Positions (indices) returned by [`insert`](#method.insert) and [`erase`](#method.erase)
/// are relative to the updated vector.
///
/// # Examples
///
/// ```
/// # use simple_vector::SimpleVector;
/// let mut v = SimpleVector::from([1, 2, 3]);
/// assert_eq!(v.capacity(), 3);
///
/// v.push(4);
/// assert_eq!(v.capacity(), 6);
///
/// let pos = v.insert(1, 99);
/// assert_eq!(v[pos], 99);
/// assert_eq!(v, [1, 99, 2, 3, 4]);
///
/// v.erase(pos);
/// assert_eq!(v, [1, 2, 3, 4]);
/// assert!(v.at(10).is_err());
/// ```
pub struct SimpleVector<T> {
	/// Owned storage.
	buf: RawBuffer<T>,

	/// Number of initialized elements at the front of `buf`.
	len: usize
}

impl<T> Drop for SimpleVector<T> {
	fn drop(&mut self) {
		unsafe {
			// drop every element, the buffer frees the memory.
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr(), self.len))
		}
	}
}

impl<T> SimpleVector<T> {
	/// Creates a new empty `SimpleVector`.
	///
	/// The vector will not allocate until elements are pushed onto it.
	#[inline]
	pub const fn new() -> Self {
		SimpleVector {
			buf: RawBuffer::new(),
			len: 0
		}
	}

	/// Creates a new empty `SimpleVector` with exactly the given capacity.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		let mut vec = Self::new();
		vec.reserve(capacity);
		vec
	}

	/// Creates a new empty `SimpleVector` from a capacity request.
	///
	/// See [`reserve`](crate::reserve()).
	#[inline]
	pub fn with_reserve(proxy: ReserveProxy) -> Self {
		Self::with_capacity(proxy.capacity())
	}

	/// Creates a `SimpleVector` of `size` default values.
	///
	/// The capacity is equal to `size`.
	pub fn with_size(size: usize) -> Self where T: Default {
		let mut vec = Self::with_capacity(size);
		vec.extend_with(size, ExtendDefault);
		vec
	}

	/// Creates a `SimpleVector` of `size` clones of `value`.
	///
	/// The capacity is equal to `size`.
	pub fn from_elem(size: usize, value: T) -> Self where T: Clone {
		let mut vec = Self::with_capacity(size);
		vec.extend_with(size, ExtendElement(value));
		vec
	}

	/// Creates a `SimpleVector` by cloning the elements of a slice, in order.
	///
	/// The capacity is equal to the length of the slice.
	pub fn from_slice(slice: &[T]) -> Self where T: Clone {
		let mut vec = Self::with_capacity(slice.len());
		vec.extend(slice.iter().cloned());
		vec
	}

	/// Returns the number of elements in the vector.
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns the number of elements the vector can hold without reallocating.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.buf.capacity()
	}

	/// Returns `true` if the vector contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns a raw pointer to the vector's buffer.
	///
	/// The caller must ensure that the vector outlives the pointer this
	/// function returns, or else it will end up pointing to garbage.
	/// Modifying the vector may cause its buffer to be reallocated,
	/// which would also make any pointers to it invalid.
	///
	/// The pointer is not null even if the vector is empty,
	/// but it must not be dereferenced in this case.
	#[inline]
	pub fn as_ptr(&self) -> *const T {
		self.buf.as_ptr()
	}

	/// Returns an unsafe mutable pointer to the vector's buffer.
	///
	/// The same invalidation rules as [`as_ptr`](#method.as_ptr) apply.
	#[inline]
	pub fn as_mut_ptr(&mut self) -> *mut T {
		self.buf.as_mut_ptr()
	}

	/// Extracts a slice containing the entire vector.
	///
	/// Equivalent to `&s[..]`.
	#[inline]
	pub fn as_slice(&self) -> &[T] {
		unsafe {
			std::slice::from_raw_parts(self.as_ptr(), self.len)
		}
	}

	/// Extracts a mutable slice of the entire vector.
	///
	/// Equivalent to `&mut s[..]`.
	#[inline]
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		unsafe {
			std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len)
		}
	}

	/// Returns a reference to the element at `index`.
	///
	/// Unlike the indexing operator, this never panics
	/// and returns [`Error::OutOfRange`] if `index >= len`.
	#[inline]
	pub fn at(&self, index: usize) -> Result<&T> {
		let len = self.len;
		self.as_slice().get(index).ok_or(Error::OutOfRange { index, len })
	}

	/// Returns a mutable reference to the element at `index`.
	///
	/// Returns [`Error::OutOfRange`] if `index >= len`.
	#[inline]
	pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
		let len = self.len;
		self.as_mut_slice().get_mut(index).ok_or(Error::OutOfRange { index, len })
	}

	/// Shortens the vector, keeping the first `len` elements and dropping
	/// the rest.
	///
	/// If `len` is greater than the vector's current length, this has no
	/// effect.
	///
	/// Note that this method has no effect on the allocated capacity
	/// of the vector.
	#[inline]
	pub fn truncate(&mut self, len: usize) {
		if len >= self.len {
			return
		}

		unsafe {
			let remaining_len = self.len - len;
			let s = ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), remaining_len);
			// set the length before dropping, in case a destructor panics.
			self.len = len;
			ptr::drop_in_place(s);
		}
	}

	/// Clears the vector, removing all values.
	///
	/// Note that this method has no effect on the allocated capacity
	/// of the vector.
	#[inline]
	pub fn clear(&mut self) {
		self.truncate(0)
	}

	/// Resizes the vector in-place so that `len` is equal to `new_len`.
	///
	/// If `new_len` is greater than `len`, the vector is extended by the
	/// difference, with each additional slot filled with `T::default()`.
	/// If the capacity is exceeded, it grows to `max(new_len, 2 * capacity)`.
	/// If `new_len` is less than `len`, the vector is simply truncated.
	#[inline]
	pub fn resize(&mut self, new_len: usize) where T: Default {
		let len = self.len;

		if new_len > len {
			self.extend_with(new_len - len, ExtendDefault)
		} else {
			self.truncate(new_len)
		}
	}

	/// Resizes the vector in-place so that `len` is equal to `new_len`,
	/// calling `f` to produce the additional elements.
	///
	/// Follows the same growth rule as [`resize`](#method.resize).
	#[inline]
	pub fn resize_with<F>(&mut self, new_len: usize, f: F) where F: FnMut() -> T {
		let len = self.len;

		if new_len > len {
			self.extend_with(new_len - len, ExtendFunc(f))
		} else {
			self.truncate(new_len)
		}
	}

	/// Appends an element to the back of the vector.
	///
	/// If the vector is full, the capacity grows to `max(len + 1, 2 * capacity)`.
	///
	/// # Panics
	///
	/// Panics if the new capacity overflows.
	#[inline]
	pub fn push(&mut self, value: T) {
		let len = self.len;
		if len == self.capacity() {
			self.grow_amortized(required_len(len, 1));
		}

		unsafe {
			ptr::write(self.as_mut_ptr().add(len), value);
		}
		self.len = len + 1;
	}

	/// Removes the last element from the vector and returns it, or [`None`] if it
	/// is empty.
	///
	/// The capacity is not reduced.
	#[inline]
	pub fn pop(&mut self) -> Option<T> {
		if self.len == 0 {
			None
		} else {
			unsafe {
				self.len -= 1;
				Some(ptr::read(self.as_ptr().add(self.len)))
			}
		}
	}

	/// Inserts an element at position `index` within the vector, shifting all
	/// elements after it to the right.
	///
	/// If the vector is full, it grows just like [`push`](#method.push).
	/// Returns the position of the inserted element, that is `index`.
	///
	/// # Panics
	///
	/// Panics if `index > len`.
	pub fn insert(&mut self, index: usize, element: T) -> usize {
		let len = self.len;
		if index > len {
			panic!("insertion index (is {}) should be <= len (is {})", index, len);
		}

		// space for the new element
		if len == self.capacity() {
			self.grow_amortized(required_len(len, 1));
		}

		unsafe {
			// infallible
			// The spot to put the new value
			{
				let p = self.as_mut_ptr().add(index);
				// Shift everything over to make space. (Duplicating the
				// `index`th element into two consecutive places.)
				ptr::copy(p, p.add(1), len - index);
				// Write it in, overwriting the first copy of the `index`th
				// element.
				ptr::write(p, element);
			}
		}
		self.len = len + 1;
		index
	}

	/// Removes and returns the element at position `index` within the vector,
	/// shifting all elements after it to the left.
	///
	/// # Panics
	///
	/// Panics if `index` is out of bounds.
	pub fn remove(&mut self, index: usize) -> T {
		let len = self.len;
		if index >= len {
			panic!("removal index (is {}) should be < len (is {})", index, len);
		}

		unsafe {
			// infallible
			let ret;
			{
				// the place we are taking from.
				let ptr = self.as_mut_ptr().add(index);
				// copy it out, unsafely having a copy of the value on
				// the stack and in the vector at the same time.
				ret = ptr::read(ptr);

				// Shift everything down to fill in that spot.
				ptr::copy(ptr.add(1), ptr, len - index - 1);
			}
			self.len = len - 1;
			ret
		}
	}

	/// Drops the element at position `index`, shifting all elements after it to the left.
	///
	/// Returns the position now holding the element that followed the erased one,
	/// that is `index` (equal to `len` if the last element was erased).
	///
	/// # Panics
	///
	/// Panics if `index` is out of bounds.
	#[inline]
	pub fn erase(&mut self, index: usize) -> usize {
		mem::drop(self.remove(index));
		index
	}

	/// Grows the capacity to exactly `new_capacity`.
	///
	/// Does nothing if the capacity is already sufficient.
	/// Note that unlike `Vec::reserve`, the argument is the total capacity,
	/// not the number of additional elements.
	///
	/// # Panics
	///
	/// Panics if the new capacity overflows.
	#[inline]
	pub fn reserve(&mut self, new_capacity: usize) {
		handle_reserve(self.try_reserve(new_capacity))
	}

	/// The same as `reserve`, but returns on errors instead of panicking or aborting.
	///
	/// On error the vector is left untouched.
	pub fn try_reserve(&mut self, new_capacity: usize) -> Result<()> {
		if new_capacity <= self.capacity() {
			return Ok(())
		}

		self.buf.try_resize(self.len, new_capacity).map_err(|e| {
			log::debug!("unable to reserve {} elements: {}", new_capacity, e);
			e
		})
	}

	/// Exchanges the contents of two vectors.
	///
	/// The buffers are exchanged, not the elements: no allocation or element move happens.
	///
	/// To swap two elements of the vector, use `as_mut_slice().swap(a, b)`.
	#[inline]
	pub fn swap(&mut self, other: &mut SimpleVector<T>) {
		unsafe {
			let other_ptr = ptr::NonNull::new_unchecked(other.buf.as_mut_ptr());
			let (ptr, capacity) = self.buf.adopt(other_ptr, other.buf.capacity());
			other.buf.adopt(ptr, capacity);
		}

		mem::swap(&mut self.len, &mut other.len);
	}

	/// Grows the buffer so that it can hold at least `required` elements.
	///
	/// The new capacity is `max(required, 2 * capacity)`.
	fn grow_amortized(&mut self, required: usize) {
		let capacity = cmp::max(required, self.capacity().saturating_mul(2));
		self.buf.resize(self.len, capacity)
	}

	/// Extend the vector by `n` values, using the given generator.
	fn extend_with<E: ExtendWith<T>>(&mut self, n: usize, mut value: E) {
		let required = required_len(self.len, n);
		if required > self.capacity() {
			self.grow_amortized(required);
		}

		unsafe {
			let mut ptr = self.buf.as_mut_ptr().add(self.len);
			// Use SetLenOnDrop to work around bug where compiler
			// may not realize the store through `ptr` and the length update
			// don't alias.
			let mut local_len = SetLenOnDrop::new(&mut self.len);

			// Write all elements except the last one
			for _ in 1..n {
				ptr::write(ptr, value.next());
				ptr = ptr.add(1);
				// Increment the length in every step in case next() panics
				local_len.increment_len(1);
			}

			if n > 0 {
				// We can write the last element directly without cloning needlessly
				ptr::write(ptr, value.last());
				local_len.increment_len(1);
			}

			// len set by scope guard
		}
	}
}

#[inline]
fn required_len(len: usize, additional: usize) -> usize {
	match len.checked_add(additional) {
		Some(required) => required,
		None => capacity_overflow()
	}
}

// Set the length of the vec when the `SetLenOnDrop` value goes out of scope.
//
// The idea is: The length field in SetLenOnDrop is a local variable
// that the optimizer will see does not alias with any stores through the Vec's data
// pointer. This is a workaround for alias analysis issue #32155
struct SetLenOnDrop<'a> {
	len: &'a mut usize,
	local_len: usize,
}

impl<'a> SetLenOnDrop<'a> {
	#[inline]
	fn new(len: &'a mut usize) -> Self {
		SetLenOnDrop { local_len: *len, len }
	}

	#[inline]
	fn increment_len(&mut self, increment: usize) {
		self.local_len += increment;
	}
}

impl Drop for SetLenOnDrop<'_> {
	#[inline]
	fn drop(&mut self) {
		*self.len = self.local_len;
	}
}

// This code generalizes `extend_with_{element,default}`.
trait ExtendWith<T> {
	fn next(&mut self) -> T;
	fn last(self) -> T;
}

struct ExtendElement<T>(T);
impl<T: Clone> ExtendWith<T> for ExtendElement<T> {
	fn next(&mut self) -> T {
		self.0.clone()
	}
	fn last(self) -> T {
		self.0
	}
}

struct ExtendDefault;
impl<T: Default> ExtendWith<T> for ExtendDefault {
	fn next(&mut self) -> T {
		Default::default()
	}
	fn last(self) -> T {
		Default::default()
	}
}

struct ExtendFunc<F>(F);
impl<T, F: FnMut() -> T> ExtendWith<T> for ExtendFunc<F> {
	fn next(&mut self) -> T {
		(self.0)()
	}
	fn last(mut self) -> T {
		(self.0)()
	}
}

impl<T> Default for SimpleVector<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Clone> Clone for SimpleVector<T> {
	/// Clones the elements into a buffer whose capacity is exactly the length of `self`.
	fn clone(&self) -> SimpleVector<T> {
		Self::from_slice(self)
	}

	fn clone_from(&mut self, source: &Self) {
		let mut copy = source.clone();
		self.swap(&mut copy)
	}
}

impl<T> Deref for SimpleVector<T> {
	type Target = [T];

	#[inline]
	fn deref(&self) -> &[T] {
		self.as_slice()
	}
}

impl<T> DerefMut for SimpleVector<T> {
	#[inline]
	fn deref_mut(&mut self) -> &mut [T] {
		self.as_mut_slice()
	}
}

impl<T> AsRef<[T]> for SimpleVector<T> {
	#[inline]
	fn as_ref(&self) -> &[T] {
		self
	}
}

impl<T> AsMut<[T]> for SimpleVector<T> {
	#[inline]
	fn as_mut(&mut self) -> &mut [T] {
		self
	}
}

impl<T: fmt::Debug> fmt::Debug for SimpleVector<T> {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&**self, f)
	}
}

impl<'v, T> IntoIterator for &'v SimpleVector<T> {
	type Item = &'v T;
	type IntoIter = std::slice::Iter<'v, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'v, T> IntoIterator for &'v mut SimpleVector<T> {
	type Item = &'v mut T;
	type IntoIter = std::slice::IterMut<'v, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter_mut()
	}
}

/// An iterator that moves out of a vector.
///
/// This `struct` is created by the `into_iter` method on [`SimpleVector`].
pub struct IntoIter<T> {
	buf: RawBuffer<T>,
	offset: usize,
	end: usize
}

impl<T> IntoIter<T> {
	/// Returns the remaining items of this iterator as a slice.
	pub fn as_slice(&self) -> &[T] {
		unsafe {
			std::slice::from_raw_parts(self.buf.as_ptr().add(self.offset), self.end - self.offset)
		}
	}
}

impl<T> Iterator for IntoIter<T> {
	type Item = T;

	#[inline]
	fn next(&mut self) -> Option<T> {
		if self.offset < self.end {
			let i = self.offset;
			self.offset += 1;
			unsafe { Some(ptr::read(self.buf.as_ptr().add(i))) }
		} else {
			None
		}
	}

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.end - self.offset;
		(remaining, Some(remaining))
	}
}

impl<T> DoubleEndedIterator for IntoIter<T> {
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		if self.offset < self.end {
			self.end -= 1;
			unsafe { Some(ptr::read(self.buf.as_ptr().add(self.end))) }
		} else {
			None
		}
	}
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
	fn drop(&mut self) {
		unsafe {
			// only drop remaining elements.
			let remaining = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(self.offset), self.end - self.offset);
			ptr::drop_in_place(remaining)
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
	}
}

impl<T> IntoIterator for SimpleVector<T> {
	type Item = T;
	type IntoIter = IntoIter<T>;

	fn into_iter(mut self) -> Self::IntoIter {
		// `self` is left empty and dropping it is a no-op.
		let buf = mem::take(&mut self.buf);
		let end = mem::replace(&mut self.len, 0);

		IntoIter {
			buf,
			offset: 0,
			end
		}
	}
}

impl<T> Extend<T> for SimpleVector<T> {
	#[inline]
	fn extend<I: IntoIterator<Item = T>>(&mut self, iterator: I) {
		for item in iterator {
			self.push(item)
		}
	}
}

impl<'a, T: Copy + 'a> Extend<&'a T> for SimpleVector<T> {
	#[inline]
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iterator: I) {
		self.extend(iterator.into_iter().copied())
	}
}

impl<T> std::iter::FromIterator<T> for SimpleVector<T> {
	#[inline]
	fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
		let mut vec = Self::new();
		vec.extend(iterator);
		vec
	}
}

impl<T, const N: usize> From<[T; N]> for SimpleVector<T> {
	/// Moves the elements of the array, in order, into a vector of capacity `N`.
	#[inline]
	fn from(array: [T; N]) -> SimpleVector<T> {
		let mut vec = Self::with_capacity(N);
		vec.extend(array);
		vec
	}
}

impl<'a, T: Clone> From<&'a [T]> for SimpleVector<T> {
	#[inline]
	fn from(slice: &'a [T]) -> SimpleVector<T> {
		Self::from_slice(slice)
	}
}

impl<T> From<Vec<T>> for SimpleVector<T> {
	#[inline]
	fn from(v: Vec<T>) -> SimpleVector<T> {
		let mut vec = Self::with_capacity(v.len());
		vec.extend(v);
		vec
	}
}

impl<T> From<SimpleVector<T>> for Vec<T> {
	#[inline]
	fn from(vec: SimpleVector<T>) -> Vec<T> {
		let mut v = Vec::with_capacity(vec.len());
		v.extend(vec);
		v
	}
}

impl<T: PartialEq> PartialEq for SimpleVector<T> {
	#[inline]
	fn eq(&self, other: &SimpleVector<T>) -> bool {
		// a vector is always equal to itself, even if its elements are not (e.g. `NaN`).
		ptr::eq(self, other) || self[..] == other[..]
	}
}

impl<T: Eq> Eq for SimpleVector<T> {}

macro_rules! impl_slice_eq1 {
	([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
		impl<$($vars)*> PartialEq<$rhs> for $lhs where T: PartialEq<U> {
			#[inline]
			fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
			#[inline]
			fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
		}
	}
}

impl_slice_eq1! { [T, U] SimpleVector<T>, Vec<U> }
impl_slice_eq1! { [T, U] Vec<T>, SimpleVector<U> }
impl_slice_eq1! { [T, U] SimpleVector<T>, [U] }
impl_slice_eq1! { [T, U] SimpleVector<T>, &[U] }
impl_slice_eq1! { [T, U] SimpleVector<T>, &mut [U] }
impl_slice_eq1! { [T, U] &[T], SimpleVector<U> }
impl_slice_eq1! { [T, U, const N: usize] SimpleVector<T>, [U; N] }
impl_slice_eq1! { [T, U, const N: usize] SimpleVector<T>, &[U; N] }
impl_slice_eq1! { [T, U, const N: usize] [T; N], SimpleVector<U> }

impl<T: PartialOrd> PartialOrd for SimpleVector<T> {
	/// Lexicographic comparison of the elements.
	#[inline]
	fn partial_cmp(&self, other: &SimpleVector<T>) -> Option<Ordering> {
		PartialOrd::partial_cmp(&**self, &**other)
	}
}

impl<T: Ord> Ord for SimpleVector<T> {
	#[inline]
	fn cmp(&self, other: &SimpleVector<T>) -> Ordering {
		Ord::cmp(&**self, &**other)
	}
}

impl<T: Hash> Hash for SimpleVector<T> {
	#[inline]
	fn hash<H: Hasher>(&self, state: &mut H) {
		Hash::hash(&**self, state)
	}
}
