//! Timely dataflow operator emitting one snapshot per input record.

use timely::dataflow::channels::pact::Pipeline;
use timely::dataflow::operators::generic::operator::Operator;
use timely::dataflow::{Scope, Stream};
use timely::Data;

use tf_core::{Snapshot, TopN, Width};

/// Running top-N view over a stream of comparable records.
pub trait TopNStream<G: Scope, D: Data + Ord> {
    /// Emit, for every input record, the snapshot of the `width` largest
    /// records seen so far, in input order.
    ///
    /// State lives in the operator instance, one accumulator per worker:
    /// the sequence semantics assume a single worker drives the stream
    /// and no exchange sits between the source and this operator.
    fn top_n(&self, width: Width) -> Stream<G, Snapshot<D>>;
}

impl<G: Scope, D: Data + Ord> TopNStream<G, D> for Stream<G, D> {
    fn top_n(&self, width: Width) -> Stream<G, Snapshot<D>> {
        self.unary(Pipeline, "TopN", move |_capability, _info| {
            let mut state = TopN::new(width);
            let mut buffer = Vec::new();
            move |input, output| {
                while let Some((time, data)) = input.next() {
                    data.swap(&mut buffer);
                    let mut session = output.session(&time);
                    for element in buffer.drain(..) {
                        session.give(state.update(element));
                    }
                }
            }
        })
    }
}
