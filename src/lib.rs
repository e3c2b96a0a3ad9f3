//! This crate provides the
//! [`SimpleVector`](crate::vector::SimpleVector)
//! data structure, a minimal growable array.
//! A `SimpleVector` keeps track of its length (the number of live elements)
//! and of its capacity (the number of elements its buffer can hold) separately.
//! The storage itself is a [`RawBuffer`](crate::raw::RawBuffer),
//! the sole owner of a heap block, that only knows how to allocate, move and release it.
//!
//! ## Basic usage
//!
//! A `SimpleVector` can be created empty, filled, from an array or with reserved capacity.
//! ```rust
//! use simple_vector::{reserve, SimpleVector};
//!
//! let empty: SimpleVector<u8> = SimpleVector::new(); // does not allocate.
//! let zeros: SimpleVector<u8> = SimpleVector::with_size(4); // [0, 0, 0, 0]
//! let sevens = SimpleVector::from_elem(2, 7u8); // [7, 7]
//! let literal = SimpleVector::from([1u8, 2, 3]);
//! let reserved: SimpleVector<u8> = reserve(32).into(); // empty, but with room for 32 elements.
//! # assert!(empty.is_empty());
//! # assert_eq!(zeros, [0, 0, 0, 0]);
//! # assert_eq!(sevens, [7, 7]);
//! # assert_eq!(literal.capacity(), 3);
//! # assert_eq!(reserved.capacity(), 32);
//! ```
//!
//! When the buffer is full, pushing or inserting doubles the capacity:
//! ```rust
//! # use simple_vector::SimpleVector;
//! let mut v = SimpleVector::from([1, 2, 3]);
//! v.push(4); // capacity was 3, it is now 6.
//! assert_eq!(v.capacity(), 6);
//! assert_eq!(v[3], 4);
//! ```
//!
//! Indexing is the fast path and panics on out of bounds indices,
//! while [`at`](crate::vector::SimpleVector::at) reports them as an error:
//! ```rust
//! # use simple_vector::{Error, SimpleVector};
//! let v = SimpleVector::from([1, 2, 3, 4]);
//! assert_eq!(v.at(1), Ok(&2));
//! assert_eq!(v.at(10), Err(Error::OutOfRange { index: 10, len: 4 }));
//! ```
pub mod raw;
pub mod vector;
pub mod reserve;
pub mod error;

pub use vector::{
	SimpleVector,
	IntoIter
};
pub use reserve::{
	reserve,
	ReserveProxy
};
pub use error::{
	Error,
	Result
};
