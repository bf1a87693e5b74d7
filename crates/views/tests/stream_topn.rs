use tf_core::Snapshot;
use tf_views::TopNStream;

use timely::dataflow::operators::capture::Event;
use timely::dataflow::operators::{Capture, ToStream};

/// Run `input` through the operator on a single worker and collect the
/// emitted snapshots in emission order.
fn run(input: Vec<i64>, width: usize) -> Vec<Vec<i64>> {
    let captured = timely::example(move |scope| input.to_stream(scope).top_n(width).capture());
    let mut snapshots = Vec::new();
    for event in captured {
        if let Event::Messages(_time, mut data) = event {
            snapshots.append(&mut data);
        }
    }
    snapshots.into_iter().map(Snapshot::into_values).collect()
}

#[test]
fn one_snapshot_per_record_in_input_order() {
    assert_eq!(
        run(vec![5, 1, 9, 3, 7, 2], 3),
        vec![
            vec![5],
            vec![5, 1],
            vec![9, 5, 1],
            vec![9, 5, 3],
            vec![9, 7, 5],
            vec![9, 7, 5],
        ],
    );
}

#[test]
fn empty_stream_completes_with_no_snapshots() {
    assert!(run(Vec::new(), 2).is_empty());
}

#[test]
fn zero_width_emits_empty_snapshots() {
    assert_eq!(run(vec![8, 3], 0), vec![Vec::<i64>::new(), Vec::new()]);
}

#[test]
fn ties_keep_the_first_claimant() {
    assert_eq!(run(vec![4, 4, 4], 1), vec![vec![4]; 3]);
}

#[test]
fn warm_up_sizes_track_the_record_count() {
    let sizes: Vec<usize> = run((0..8).collect(), 5).iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![1, 2, 3, 4, 5, 5, 5, 5]);
}
