use core::alloc::Layout;
use thiserror::Error;

/// Errors reported by [`SimpleVector`](crate::SimpleVector) and [`RawBuffer`](crate::raw::RawBuffer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// Checked access with an index that is not less than the length.
	#[error("index {index} is out of range for a vector of length {len}")]
	OutOfRange {
		index: usize,
		len: usize
	},

	/// The requested capacity cannot be represented by a memory layout.
	#[error("capacity overflow")]
	CapacityOverflow,

	/// The global allocator could not satisfy the request.
	#[error("memory allocation of {} bytes failed", .layout.size())]
	AllocError {
		layout: Layout
	}
}

pub type Result<T> = std::result::Result<T, Error>;
