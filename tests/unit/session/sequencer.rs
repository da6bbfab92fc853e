use super::*;

#[test]
fn emits_one_simulated_second_per_frame() {
    let steps: Vec<_> = AnimationSequencer::new(100, 5).collect();
    let secs: Vec<_> = steps.iter().map(|s| s.seconds_left).collect();
    assert_eq!(secs, vec![100, 99, 98, 97, 96]);
    let idx: Vec<_> = steps.iter().map(|s| s.index.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    for s in &steps {
        assert_eq!(s.units.total_secs(), s.seconds_left);
    }
}

#[test]
fn clamps_at_zero_near_the_target() {
    let secs: Vec<_> = AnimationSequencer::new(2, 5)
        .map(|s| s.seconds_left)
        .collect();
    assert_eq!(secs, vec![2, 1, 0, 0, 0]);
}

#[test]
fn past_target_is_all_zero() {
    let steps: Vec<_> = AnimationSequencer::new(0, 4).collect();
    assert_eq!(steps.len(), 4);
    assert!(steps.iter().all(|s| s.units == TimeUnits::default()));
}

#[test]
fn single_frame_has_no_decrement() {
    let steps: Vec<_> = AnimationSequencer::new(42, 1).collect();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].seconds_left, 42);

    let mut seq = AnimationSequencer::new(42, 1);
    seq.next().unwrap();
    assert_eq!(seq.state(), SequencerState::Done);
}

#[test]
fn state_machine_transitions() {
    let mut seq = AnimationSequencer::new(10, 2);
    assert_eq!(seq.state(), SequencerState::Init);
    assert_eq!(seq.len(), 2);

    seq.next().unwrap();
    assert_eq!(seq.state(), SequencerState::Emitting(0));
    assert_eq!(seq.len(), 1);

    seq.next().unwrap();
    assert_eq!(seq.state(), SequencerState::Done, "final frame enters Done");
    assert_eq!(seq.len(), 0);

    assert!(seq.next().is_none());
    assert_eq!(seq.state(), SequencerState::Done);
    assert!(seq.next().is_none());
}

#[test]
fn zero_frames_finishes_immediately() {
    let mut seq = AnimationSequencer::new(10, 0);
    assert!(seq.next().is_none());
    assert_eq!(seq.state(), SequencerState::Done);
}

#[test]
fn five_days_starts_with_five_days() {
    let first = AnimationSequencer::new(5 * 86_400, 5).next().unwrap();
    assert_eq!(first.units.days, 5);
    assert_eq!(first.units.hours, 0);
    let second = AnimationSequencer::new(5 * 86_400, 5).nth(1).unwrap();
    assert_eq!(second.units.days, 4);
    assert_eq!(second.units.hours, 23);
    assert_eq!(second.units.minutes, 59);
    assert_eq!(second.units.seconds, 59);
}
