/// Bitset over pattern identities for the propagation prefilter
pub mod bitset;
/// Run state machine: clear, seed, collapse, propagate, restart
pub mod executor;
/// Weighted multiset of pattern identities
pub mod multiset;
/// Worklist constraint propagation to a fixpoint
pub mod propagation;
/// Entropy computation and lowest-entropy cell selection
pub mod selection;
/// Post-generation neighborhood oracle
pub mod validation;
