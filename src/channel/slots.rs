use smallvec::SmallVec;

/// Ordered, id-keyed storage for the slots connected to a channel.
///
/// Ids are handed out monotonically and never reused, so a stale id held by
/// a disconnected handle can never alias a newer slot. Most channels carry
/// one or two slots; those stay inline without a heap allocation. Iteration
/// follows connection order, which is the order a channel delivers in.
///
/// ```rust
/// use observable_variant::channel::Slots;
///
/// let mut slots: Slots<&str> = Slots::default();
///
/// let a = slots.add("a");
/// let b = slots.add("b");
/// assert_eq!(slots.len(), 2);
///
/// assert_eq!(slots.remove(a), Some("a"));
/// assert!(!slots.contains(a));
/// assert!(slots.contains(b));
/// ```
pub struct Slots<U> {
  next: usize,
  entries: SmallVec<[(usize, U); 2]>,
}

impl<U> Default for Slots<U> {
  fn default() -> Self { Self { next: 0, entries: SmallVec::new() } }
}

impl<U> Slots<U> {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Append `slot` and return the id that disconnects it.
  pub fn add(&mut self, slot: U) -> usize {
    let id = self.next;
    self.next = id + 1;
    self.entries.push((id, slot));
    id
  }

  /// Take out the slot registered under `id`, if it is still connected.
  pub fn remove(&mut self, id: usize) -> Option<U> {
    let at = self.entries.iter().position(|&(slot, _)| slot == id)?;
    Some(self.entries.remove(at).1)
  }

  #[inline]
  pub fn contains(&self, id: usize) -> bool { self.entries().any(|(slot, _)| slot == id) }

  #[inline]
  pub fn len(&self) -> usize { self.entries.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Slots in connection order.
  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &U> { self.entries().map(|(_, slot)| slot) }

  /// `(id, slot)` pairs in connection order.
  #[inline]
  pub fn entries(&self) -> impl Iterator<Item = (usize, &U)> {
    self.entries.iter().map(|(id, slot)| (*id, slot))
  }
}
