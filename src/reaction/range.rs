use std::rc::Rc;

/// A reaction to a position-aware event, such as an insertion into or an
/// erasure from a sequence.
///
/// There is no shape negotiation here: the position is the point of the
/// event, so the only accepted signature is
/// `Fn(&Owner, &Container, Position) -> Out`, with the result discarded.
pub trait RangeReaction<Owner: ?Sized, Container: ?Sized, Position, Out = ()>: 'static {
  fn react(&self, owner: &Owner, container: &Container, position: Position);
}

impl<F, Owner, Container, Position, Out> RangeReaction<Owner, Container, Position, Out> for F
where
  F: Fn(&Owner, &Container, Position) -> Out + 'static,
  Owner: ?Sized,
  Container: ?Sized,
{
  #[inline]
  fn react(&self, owner: &Owner, container: &Container, position: Position) {
    self(owner, container, position);
  }
}

pub type RangeSlot<Owner, Container, Position> = dyn Fn(&Owner, &Container, Position);

/// Adapt `reaction` to the uniform [`RangeSlot`] call shape.
///
/// A reaction that leaves out the position does not compile:
///
/// ```compile_fail
/// use observable_variant::reaction::range_slot;
///
/// let _ = range_slot::<(), [char], usize, _, _>(|_: &(), _: &[char]| {});
/// ```
pub fn range_slot<Owner, Container, Position, Out, R>(
  reaction: R,
) -> Rc<RangeSlot<Owner, Container, Position>>
where
  Owner: ?Sized + 'static,
  Container: ?Sized + 'static,
  Position: 'static,
  R: RangeReaction<Owner, Container, Position, Out>,
{
  Rc::new(move |owner: &Owner, container: &Container, position: Position| {
    reaction.react(owner, container, position)
  })
}
