use proptest::prelude::*;
use simple_vector::{
	reserve,
	Error,
	SimpleVector
};

#[test]
fn literal_push_insert_erase_scenario() {
	let mut v = SimpleVector::from([1, 2, 3]);
	assert_eq!(v.len(), 3);
	assert_eq!(v.capacity(), 3);

	v.push(4);
	assert_eq!(v.capacity(), 6);
	assert_eq!(v.len(), 4);
	assert_eq!(v[3], 4);

	let pos = v.insert(1, 99);
	assert_eq!(pos, 1);
	assert_eq!(v[pos], 99);
	assert_eq!(v, [1, 99, 2, 3, 4]);

	let pos = v.erase(1);
	assert_eq!(pos, 1);
	assert_eq!(v, [1, 2, 3, 4]);

	assert_eq!(v.at(10), Err(Error::OutOfRange { index: 10, len: 4 }));
}

#[test]
fn reserved_vector_fills_without_reallocating() {
	let mut v = SimpleVector::from(reserve(4));
	let ptr = v.as_ptr();
	for word in ["a", "b", "c", "d"] {
		v.push(word.to_string());
	}
	assert_eq!(v.as_ptr(), ptr);
	assert_eq!(v.capacity(), 4);

	v.push("e".to_string());
	assert_eq!(v.capacity(), 8);
	assert_eq!(v.iter().map(String::as_str).collect::<Vec<_>>(), ["a", "b", "c", "d", "e"]);
}

#[test]
fn insert_into_full_vector_grows_once() {
	let mut v = SimpleVector::from([1, 2]);
	let pos = v.insert(0, 0);
	assert_eq!(v[pos], 0);
	assert_eq!(v.capacity(), 4);
	assert_eq!(v, [0, 1, 2]);
}

#[test]
fn conversions() {
	let v: SimpleVector<i32> = (1..=4).collect();
	let as_vec: Vec<i32> = v.clone().into();
	assert_eq!(as_vec, vec![1, 2, 3, 4]);
	assert_eq!(as_vec, v);
	assert_eq!(SimpleVector::from(as_vec), v);
	assert_eq!(SimpleVector::from(&[1, 2, 3, 4][..]), v);
	assert_eq!(v.into_iter().rev().collect::<Vec<_>>(), [4, 3, 2, 1]);
}

#[test]
fn iteration_covers_live_range_only() {
	let mut v: SimpleVector<i32> = SimpleVector::with_capacity(10);
	v.extend([1, 2, 3]);
	for x in &mut v {
		*x *= 10;
	}
	assert_eq!((&v).into_iter().copied().collect::<Vec<_>>(), [10, 20, 30]);

	let range = v.as_ptr_range();
	assert_eq!(unsafe { range.end.offset_from(range.start) }, 3);

	v.clear();
	assert_eq!(v.iter().next(), None);
	assert_eq!(v.capacity(), 10);
}

#[test]
fn debug_format() {
	let v = SimpleVector::from(["x", "y"]);
	assert_eq!(format!("{:?}", v), r#"["x", "y"]"#);
}

proptest! {
	#[test]
	fn push_growth_follows_doubling(
		initial_capacity in 0usize..16,
		pushes in 1usize..64,
	) {
		let mut v = SimpleVector::with_capacity(initial_capacity);
		for i in 0..pushes {
			let (len, capacity) = (v.len(), v.capacity());
			v.push(i);
			let expected = if len == capacity {
				std::cmp::max(len + 1, capacity * 2)
			} else {
				capacity
			};
			prop_assert_eq!(v.capacity(), expected);
			prop_assert!(v.len() <= v.capacity());
		}
	}

	#[test]
	fn reserve_is_monotonic(
		items in proptest::collection::vec(any::<u32>(), 0..20),
		request in 0usize..64,
	) {
		let mut v = SimpleVector::from(items.clone());
		let before = v.capacity();
		v.reserve(request);
		prop_assert_eq!(v.capacity(), std::cmp::max(before, request));
		prop_assert_eq!(v.len(), items.len());
		prop_assert_eq!(&v, &items);
	}

	#[test]
	fn insert_then_erase_restores_sequence(
		items in proptest::collection::vec(any::<i64>(), 0..20),
		position in any::<prop::sample::Index>(),
		value in any::<i64>(),
	) {
		let mut v = SimpleVector::from(items.clone());
		let pos = v.insert(position.index(items.len() + 1), value);
		prop_assert_eq!(v[pos], value);
		v.erase(pos);
		prop_assert_eq!(&v, &items);
	}

	#[test]
	fn at_fails_exactly_past_the_end(
		items in proptest::collection::vec(any::<u8>(), 0..20),
		index in 0usize..40,
	) {
		let v = SimpleVector::from(items.clone());
		match v.at(index) {
			Ok(x) => {
				prop_assert_eq!(*x, items[index]);
			}
			Err(e) => {
				prop_assert!(index >= items.len());
				prop_assert_eq!(e, Error::OutOfRange { index, len: items.len() });
			}
		}
		prop_assert!(v.at(items.len()).is_err());
	}

	#[test]
	fn ordering_matches_lexicographic_order(
		a in proptest::collection::vec(0u8..4, 0..6),
		b in proptest::collection::vec(0u8..4, 0..6),
		spare in 0usize..8,
	) {
		let va = SimpleVector::from(a.clone());
		let mut vb: SimpleVector<u8> = SimpleVector::with_capacity(b.len() + spare);
		vb.extend(b.iter().copied());

		prop_assert_eq!(va == vb, a == b);
		prop_assert_eq!(va < vb, a < b);
		prop_assert_eq!(va <= vb, a <= b);
		prop_assert_eq!(va > vb, a > b);
		prop_assert_eq!(va >= vb, a >= b);
		prop_assert_eq!(va.cmp(&vb), a.cmp(&b));
		prop_assert!(va == va);
	}

	#[test]
	fn swap_exchanges_contents(
		a in proptest::collection::vec(any::<i32>(), 0..10),
		b in proptest::collection::vec(any::<i32>(), 0..10),
	) {
		let mut va = SimpleVector::from(a.clone());
		let mut vb = SimpleVector::from(b.clone());
		let (a_ptr, b_ptr) = (va.as_ptr(), vb.as_ptr());
		va.swap(&mut vb);
		prop_assert_eq!(&va, &b);
		prop_assert_eq!(&vb, &a);
		prop_assert_eq!(va.as_ptr(), b_ptr);
		prop_assert_eq!(vb.as_ptr(), a_ptr);
	}
}
