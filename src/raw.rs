use core::{
	alloc::Layout,
	marker::PhantomData,
	mem,
	ptr::{
		self,
		NonNull
	},
	cmp
};
use std::alloc::{
	self,
	handle_alloc_error
};
use crate::error::{
	Error,
	Result
};

/// A low-level utility owning a single heap block of `T` slots.
///
/// This type does not in anyway inspect the memory that it manages. When dropped it *will*
/// free its memory, but it *won't* try to drop its contents. It is up to the user of `RawBuffer`
/// to handle the actual things *stored* inside of a `RawBuffer`.
///
/// The buffer only remembers how many slots its block holds, because this is needed to
/// release the block. It has no notion of how many of those slots are initialized.
///
/// A `RawBuffer` is move-only: at most one instance ever holds a given block.
pub struct RawBuffer<T> {
	/// Pointer to the block, dangling if no block is held.
	ptr: NonNull<T>,

	/// Number of slots in the block.
	capacity: usize,

	/// The buffer logically owns values of type `T`.
	marker: PhantomData<T>
}

unsafe impl<T: Send> Send for RawBuffer<T> {}
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> Drop for RawBuffer<T> {
	fn drop(&mut self) {
		unsafe {
			release(self.ptr, self.capacity)
		}
	}
}

impl<T> Default for RawBuffer<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T> RawBuffer<T> {
	/// Creates a new empty buffer.
	///
	/// Does not allocate.
	#[inline]
	pub const fn new() -> Self {
		RawBuffer {
			ptr: NonNull::dangling(),
			capacity: 0,
			marker: PhantomData
		}
	}

	/// Creates a buffer with room for exactly `capacity` elements.
	///
	/// The slots are left uninitialized. A capacity of `0` yields an empty buffer.
	///
	/// # Panics
	///
	/// Panics if the requested size overflows, and aborts through
	/// [`handle_alloc_error`] if the allocator fails.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		handle_reserve(Self::try_with_capacity(capacity))
	}

	/// The same as `with_capacity`, but returns on errors instead of panicking or aborting.
	pub fn try_with_capacity(capacity: usize) -> Result<Self> {
		Ok(RawBuffer {
			ptr: allocate(capacity)?,
			capacity,
			marker: PhantomData
		})
	}

	/// Number of slots held by the buffer.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Returns a raw pointer to the first slot.
	///
	/// The pointer is dangling (but well aligned) if no block is held.
	/// It is only meant for accessing the slots, never for taking ownership of the block.
	#[inline]
	pub fn as_ptr(&self) -> *const T {
		self.ptr.as_ptr()
	}

	/// Returns an unsafe mutable pointer to the first slot.
	#[inline]
	pub fn as_mut_ptr(&mut self) -> *mut T {
		self.ptr.as_ptr()
	}

	/// Moves the block to a new allocation of `new_capacity` slots.
	///
	/// The first `min(len, new_capacity)` slots are moved into the new block,
	/// the others are left uninitialized. The old block is then released.
	///
	/// # Panics
	///
	/// Panics if the requested size overflows, and aborts through
	/// [`handle_alloc_error`] if the allocator fails.
	#[inline]
	pub fn resize(&mut self, len: usize, new_capacity: usize) {
		handle_reserve(self.try_resize(len, new_capacity))
	}

	/// The same as `resize`, but returns on errors instead of panicking or aborting.
	///
	/// On error the buffer is left untouched.
	///
	/// The caller is responsible for the slots `[new_capacity, len)` if any:
	/// they are not moved, and will never be dropped by the buffer.
	pub fn try_resize(&mut self, len: usize, new_capacity: usize) -> Result<()> {
		debug_assert!(len <= self.capacity);

		let new_ptr = allocate::<T>(new_capacity)?;
		let count = cmp::min(len, new_capacity);

		unsafe {
			ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), count);
			release(self.ptr, self.capacity);
		}

		log::trace!("buffer moved from {} to {} slots ({} elements)", self.capacity, new_capacity, count);
		self.ptr = new_ptr;
		self.capacity = new_capacity;
		Ok(())
	}

	/// Replaces the held block by `ptr` without releasing it, and returns the previous block.
	///
	/// ## Safety
	///
	/// `ptr` must be a block of `capacity` slots allocated the way `RawBuffer` allocates,
	/// and owned by nobody else once adopted.
	/// The returned block is not released anymore by this buffer:
	/// the caller must hand it to another buffer (typically with a matching `adopt` call),
	/// or it is leaked.
	#[inline]
	pub unsafe fn adopt(&mut self, ptr: NonNull<T>, capacity: usize) -> (NonNull<T>, usize) {
		let previous = (self.ptr, self.capacity);
		self.ptr = ptr;
		self.capacity = capacity;
		previous
	}
}

/// Allocate a block of `capacity` uninitialized slots.
///
/// No allocation happens for an empty block or zero-sized elements.
fn allocate<T>(capacity: usize) -> Result<NonNull<T>> {
	if capacity == 0 || mem::size_of::<T>() == 0 {
		return Ok(NonNull::dangling())
	}

	let layout = Layout::array::<T>(capacity).map_err(|_| Error::CapacityOverflow)?;
	let ptr = unsafe { alloc::alloc(layout) };
	NonNull::new(ptr.cast()).ok_or(Error::AllocError { layout })
}

/// Release a block previously returned by `allocate`.
unsafe fn release<T>(ptr: NonNull<T>, capacity: usize) {
	if capacity != 0 && mem::size_of::<T>() != 0 {
		// We have an allocated chunk of memory, so we can bypass runtime
		// checks to get our current layout.
		let align = mem::align_of::<T>();
		let size = mem::size_of::<T>() * capacity;
		let layout = Layout::from_size_align_unchecked(size, align);
		alloc::dealloc(ptr.as_ptr().cast(), layout)
	}
}

// Central function for reserve error handling.
#[inline]
pub(crate) fn handle_reserve<T>(result: Result<T>) -> T {
	match result {
		Err(Error::AllocError { layout }) => handle_alloc_error(layout),
		Err(_) => capacity_overflow(),
		Ok(t) => t
	}
}

// One central function responsible for reporting capacity overflows. This'll
// ensure that the code generation related to these panics is minimal as there's
// only one location which panics rather than a bunch throughout the module.
pub(crate) fn capacity_overflow() -> ! {
	panic!("capacity overflow");
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fill(buffer: &mut RawBuffer<u64>, len: usize) {
		for i in 0..len {
			unsafe { buffer.as_mut_ptr().add(i).write(i as u64 * 10) }
		}
	}

	fn read(buffer: &RawBuffer<u64>, len: usize) -> Vec<u64> {
		(0..len).map(|i| unsafe { buffer.as_ptr().add(i).read() }).collect()
	}

	#[test]
	fn new_is_empty() {
		let buffer: RawBuffer<u64> = RawBuffer::new();
		assert_eq!(buffer.capacity(), 0);
		assert!(!buffer.as_ptr().is_null());
	}

	#[test]
	fn zero_capacity_does_not_allocate() {
		let buffer: RawBuffer<u64> = RawBuffer::with_capacity(0);
		assert_eq!(buffer.capacity(), 0);
		assert_eq!(buffer.as_ptr(), NonNull::<u64>::dangling().as_ptr() as *const u64);
	}

	#[test]
	fn resize_grow_preserves_prefix() {
		let mut buffer = RawBuffer::with_capacity(3);
		fill(&mut buffer, 3);
		buffer.resize(3, 8);
		assert_eq!(buffer.capacity(), 8);
		assert_eq!(read(&buffer, 3), [0, 10, 20]);
	}

	#[test]
	fn resize_shrink_keeps_leading_elements() {
		let mut buffer = RawBuffer::with_capacity(5);
		fill(&mut buffer, 5);
		buffer.resize(5, 2);
		assert_eq!(buffer.capacity(), 2);
		assert_eq!(read(&buffer, 2), [0, 10]);
	}

	#[test]
	fn resize_from_empty() {
		let mut buffer: RawBuffer<u64> = RawBuffer::new();
		buffer.resize(0, 4);
		assert_eq!(buffer.capacity(), 4);
		buffer.resize(0, 0);
		assert_eq!(buffer.capacity(), 0);
	}

	#[test]
	fn overflowing_capacity_is_reported() {
		assert_eq!(RawBuffer::<u64>::try_with_capacity(usize::MAX).err(), Some(Error::CapacityOverflow));

		let mut buffer = RawBuffer::with_capacity(2);
		fill(&mut buffer, 2);
		assert_eq!(buffer.try_resize(2, usize::MAX), Err(Error::CapacityOverflow));
		assert_eq!(buffer.capacity(), 2);
		assert_eq!(read(&buffer, 2), [0, 10]);
	}

	#[test]
	#[should_panic(expected = "capacity overflow")]
	fn overflowing_capacity_panics() {
		let _ = RawBuffer::<u32>::with_capacity(usize::MAX);
	}

	#[test]
	fn adopt_exchanges_blocks() {
		let mut a = RawBuffer::with_capacity(2);
		let mut b = RawBuffer::with_capacity(4);
		fill(&mut a, 2);
		let a_ptr = a.as_ptr();
		let b_ptr = b.as_ptr();

		unsafe {
			let (ptr, capacity) = a.adopt(NonNull::new_unchecked(b.as_mut_ptr()), b.capacity());
			b.adopt(ptr, capacity);
		}

		assert_eq!(a.as_ptr(), b_ptr);
		assert_eq!(a.capacity(), 4);
		assert_eq!(b.as_ptr(), a_ptr);
		assert_eq!(b.capacity(), 2);
		assert_eq!(read(&b, 2), [0, 10]);
	}

	#[test]
	fn zero_sized_elements() {
		let mut buffer: RawBuffer<()> = RawBuffer::with_capacity(100);
		assert_eq!(buffer.capacity(), 100);
		buffer.resize(100, 1000);
		assert_eq!(buffer.capacity(), 1000);
	}
}
