//! Keyed reconciliation of a retained element list.
//!
//! Each frame the engines describe the elements they want as `(key, attrs)`
//! pairs. [`Reconciler::reconcile`] compares that list with what was rendered
//! last time and returns the minimal set of [`Patch`]es: elements whose key is
//! new are created, elements whose attributes changed are updated, vanished
//! keys are removed and untouched elements produce nothing. After
//! [`Reconciler::invalidate`] the next pass recreates everything, which is
//! how resizes and dataset swaps force a full rebuild.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Debug, PartialEq)]
pub enum Patch<K, A> {
	Create { key: K, attrs: A },
	Update { key: K, attrs: A },
	Remove { key: K },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchCounts {
	pub created: usize,
	pub updated: usize,
	pub removed: usize,
}

impl PatchCounts {
	pub fn of<K, A>(patches: &[Patch<K, A>]) -> Self {
		patches.iter().fold(Self::default(), |mut acc, patch| {
			match patch {
				Patch::Create { .. } => acc.created += 1,
				Patch::Update { .. } => acc.updated += 1,
				Patch::Remove { .. } => acc.removed += 1,
			}
			acc
		})
	}

	pub fn is_empty(&self) -> bool {
		self.created == 0 && self.updated == 0 && self.removed == 0
	}
}

#[derive(Clone, Debug)]
pub struct Reconciler<K, A> {
	elements: Vec<(K, A)>,
	index: HashMap<K, usize>,
	stale: bool,
}

impl<K, A> Default for Reconciler<K, A> {
	fn default() -> Self {
		Self {
			elements: Vec::new(),
			index: HashMap::new(),
			stale: false,
		}
	}
}

impl<K, A> Reconciler<K, A>
where
	K: Clone + Eq + Hash,
	A: Clone + PartialEq,
{
	pub fn new() -> Self {
		Self::default()
	}

	/// Forces the next [`reconcile`](Self::reconcile) to rebuild every element.
	pub fn invalidate(&mut self) {
		self.stale = true;
	}

	/// Diffs `desired` against the retained list and adopts it.
	///
	/// Removals come first in the returned list so a rebuilt key is removed
	/// before it is created again. Later duplicates of a key are ignored.
	pub fn reconcile<I>(&mut self, desired: I) -> Vec<Patch<K, A>>
	where
		I: IntoIterator<Item = (K, A)>,
	{
		let rebuild = std::mem::take(&mut self.stale);
		let mut next: Vec<(K, A)> = Vec::new();
		let mut next_index: HashMap<K, usize> = HashMap::new();
		let mut changes = Vec::new();

		for (key, attrs) in desired {
			if next_index.contains_key(&key) {
				continue;
			}
			let previous = if rebuild {
				None
			} else {
				self.index.get(&key).map(|&i| &self.elements[i].1)
			};
			match previous {
				None => changes.push(Patch::Create {
					key: key.clone(),
					attrs: attrs.clone(),
				}),
				Some(old) if *old != attrs => changes.push(Patch::Update {
					key: key.clone(),
					attrs: attrs.clone(),
				}),
				Some(_) => {}
			}
			next_index.insert(key.clone(), next.len());
			next.push((key, attrs));
		}

		let mut patches: Vec<Patch<K, A>> = self
			.elements
			.iter()
			.filter(|(key, _)| rebuild || !next_index.contains_key(key))
			.map(|(key, _)| Patch::Remove { key: key.clone() })
			.collect();
		patches.extend(changes);

		self.elements = next;
		self.index = next_index;
		patches
	}

	/// Retained elements in paint order.
	pub fn elements(&self) -> impl Iterator<Item = (&K, &A)> {
		self.elements.iter().map(|(k, a)| (k, a))
	}

	pub fn get(&self, key: &K) -> Option<&A> {
		self.index.get(key).map(|&i| &self.elements[i].1)
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn scene(items: &[(&'static str, u32)]) -> Vec<(&'static str, u32)> {
		items.to_vec()
	}

	#[test]
	fn first_pass_creates_everything() {
		let mut r = Reconciler::new();
		let patches = r.reconcile(scene(&[("a", 1), ("b", 2)]));
		assert_eq!(
			patches,
			vec![
				Patch::Create { key: "a", attrs: 1 },
				Patch::Create { key: "b", attrs: 2 },
			]
		);
		assert_eq!(r.len(), 2);
	}

	#[test]
	fn unchanged_elements_are_left_alone() {
		let mut r = Reconciler::new();
		r.reconcile(scene(&[("a", 1), ("b", 2)]));
		let patches = r.reconcile(scene(&[("a", 1), ("b", 3), ("c", 4)]));
		assert_eq!(
			patches,
			vec![
				Patch::Update { key: "b", attrs: 3 },
				Patch::Create { key: "c", attrs: 4 },
			]
		);
		assert!(r.reconcile(scene(&[("a", 1), ("b", 3), ("c", 4)])).is_empty());
	}

	#[test]
	fn vanished_keys_are_removed_first() {
		let mut r = Reconciler::new();
		r.reconcile(scene(&[("a", 1), ("b", 2)]));
		let patches = r.reconcile(scene(&[("c", 5), ("b", 2)]));
		assert_eq!(
			patches,
			vec![Patch::Remove { key: "a" }, Patch::Create { key: "c", attrs: 5 }]
		);
		assert_eq!(r.get(&"a"), None);
		assert_eq!(
			r.elements().map(|(k, _)| *k).collect::<Vec<_>>(),
			vec!["c", "b"]
		);
	}

	#[test]
	fn invalidate_recreates_even_identical_elements() {
		let mut r = Reconciler::new();
		r.reconcile(scene(&[("a", 1), ("b", 2)]));
		r.invalidate();
		let counts = PatchCounts::of(&r.reconcile(scene(&[("a", 1), ("b", 2)])));
		assert_eq!(
			counts,
			PatchCounts {
				created: 2,
				updated: 0,
				removed: 2
			}
		);
		// The rebuild is one-shot.
		assert!(PatchCounts::of(&r.reconcile(scene(&[("a", 1), ("b", 2)]))).is_empty());
	}

	#[test]
	fn duplicate_keys_keep_the_first() {
		let mut r = Reconciler::new();
		let patches = r.reconcile(scene(&[("a", 1), ("a", 9)]));
		assert_eq!(patches, vec![Patch::Create { key: "a", attrs: 1 }]);
		assert_eq!(r.get(&"a"), Some(&1));
	}
}
