/// Tells the search when to stop evaluating further candidates.
pub trait Budget {
    fn exhausted(&self) -> bool;
}

/// Never runs out.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl Budget for Unbounded {
    fn exhausted(&self) -> bool {
        false
    }
}

/// Already spent: only the first legal candidate gets evaluated.
#[derive(Clone, Copy, Debug, Default)]
pub struct Expired;

impl Budget for Expired {
    fn exhausted(&self) -> bool {
        true
    }
}

impl<B: Budget + ?Sized> Budget for &B {
    fn exhausted(&self) -> bool {
        (**self).exhausted()
    }
}
