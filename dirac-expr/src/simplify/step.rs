//! Reporting of the individual rewrites performed during simplification.

/// A single rewrite performed by the simplifier, named after the identity it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a+(b+c) = a+b+c`
    FlattenTerms,

    /// `a+0 = a`
    AddZero,

    /// `a+a = 2a`
    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `a*(b*c) = a*b*c`
    FlattenFactors,

    /// `a*0 = 0`
    MultiplyZero,

    /// `a*1 = a`
    MultiplyOne,

    /// `4/12 = 1/3`
    /// `12/4 = 3`
    ReduceFraction,

    /// `a*a = a^2`
    /// `a^2*a^4 = a^6`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^c = a^(b*c)`
    PowerPower,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a*b)^c = a^c*b^c`
    DistributePower,
}

/// A sink for the steps an algorithm takes.
///
/// The unit type `()` implements this trait by discarding every step, for callers that only want
/// the final result.
pub trait StepCollector<S> {
    /// Records a single step.
    fn push(&mut self, step: S);
}

/// Discards every step.
impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

/// Appends every step to the vector.
impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
