//! Full-pipeline tests: tracked poses in, committed moves out.

use gesture_chess::{
    AllowAll, BodyPose, CandidateMove, GestureDetector, GestureIntents, HumanPlayer, Intent,
    NullNotifier, Player, ScriptedIntents, ScriptedPlayer, SharedPoseSource, Side, Square,
    StandardBoard, TurnOutcome, Vec3,
};

const STANDING_HEAD: Vec3 = Vec3 {
    x: 0.0,
    y: 0.5,
    z: 0.0,
};

fn rest() -> BodyPose {
    BodyPose::tracked(
        Vec3::new(-0.2, 0.0, 0.0),
        Vec3::new(0.2, 0.0, 0.0),
        STANDING_HEAD,
    )
}

fn reach_forward() -> BodyPose {
    BodyPose::tracked(
        Vec3::new(-0.2, 0.0, 0.4),
        Vec3::new(0.2, 0.0, 0.4),
        STANDING_HEAD,
    )
}

fn jump() -> BodyPose {
    BodyPose::tracked(
        Vec3::new(-0.2, 0.0, 0.0),
        Vec3::new(0.2, 0.0, 0.0),
        Vec3::new(0.0, 0.8, 0.0),
    )
}

fn squat() -> BodyPose {
    BodyPose::tracked(
        Vec3::new(-0.2, 0.0, 0.0),
        Vec3::new(0.2, 0.0, 0.0),
        Vec3::new(0.0, 0.1, 0.0),
    )
}

fn gesture_player(rig: &SharedPoseSource, side: Side) -> HumanPlayer {
    let detector = GestureDetector::with_defaults(Box::new(rig.clone()));
    HumanPlayer::new(
        side,
        Box::new(GestureIntents::new(detector)),
        Box::new(StandardBoard),
        Box::new(AllowAll),
        Box::new(NullNotifier),
    )
}

fn committed(player: &HumanPlayer) -> Option<CandidateMove> {
    player.outcome().and_then(|o| o.committed_move()).copied()
}

#[test]
fn test_gestures_drive_a_turn_to_commitment() {
    let rig = SharedPoseSource::new(rest());
    let mut player = gesture_player(&rig, Side::White);
    player.start_move(Square::new(4, 0));

    // Hold each pose for a couple of frames with a rest between, the way a
    // real body moves; the debounce turns every hold into one intent.
    let frames = [
        reach_forward(),
        reach_forward(),
        rest(),
        jump(),
        jump(),
        rest(),
        reach_forward(),
        rest(),
        squat(),
        squat(),
    ];
    for pose in frames {
        rig.set_pose(pose);
        player.tick();
        if player.is_done() {
            break;
        }
    }

    let mv = committed(&player).expect("gesture sequence should commit a move");
    assert_eq!(mv.side, Side::White);
    assert_eq!(mv.src, Square::new(4, 1));
    assert_eq!(mv.dst, Square::new(4, 2));
}

#[test]
fn test_held_pose_steps_exactly_once() {
    let rig = SharedPoseSource::new(reach_forward());
    let mut player = gesture_player(&rig, Side::White);
    player.start_move(Square::new(3, 3));

    for _ in 0..10 {
        player.tick();
    }

    // Still selecting the source, one square north of where it started.
    assert!(!player.is_done());

    // Release and lean again: a second step fires.
    rig.set_pose(rest());
    player.tick();
    rig.set_pose(reach_forward());
    player.tick();

    // Close out the turn to observe where the cursor ended up.
    rig.set_pose(rest());
    player.tick();
    rig.set_pose(jump());
    player.tick();
    rig.set_pose(rest());
    player.tick();
    rig.set_pose(squat());
    player.tick();

    let mv = committed(&player).expect("turn should commit");
    assert_eq!(mv.src, Square::new(3, 5));
    assert_eq!(mv.dst, Square::new(3, 5));
}

#[test]
fn test_tracking_loss_pauses_without_failing() {
    let rig = SharedPoseSource::new(reach_forward());
    let mut player = gesture_player(&rig, Side::White);
    player.start_move(Square::new(0, 0));

    player.tick();

    // Head tracking drops out for a few frames.
    let mut lost = reach_forward();
    lost.head = None;
    rig.set_pose(lost);
    for _ in 0..3 {
        player.tick();
    }
    assert!(!player.is_done());

    // Tracking returns mid-lean: the lost frames acted as the release, so
    // the same lean fires again.
    rig.set_pose(reach_forward());
    player.tick();

    rig.set_pose(rest());
    player.tick();
    rig.set_pose(jump());
    player.tick();
    rig.set_pose(rest());
    player.tick();
    rig.set_pose(squat());
    player.tick();

    let mv = committed(&player).expect("turn should commit after reacquisition");
    assert_eq!(mv.src, Square::new(0, 2));
}

#[test]
fn test_frozen_rig_forfeits_at_budget() {
    let rig = SharedPoseSource::new(rest());
    let mut player = gesture_player(&rig, Side::Black).with_tick_budget(8);
    player.start_move(Square::new(4, 4));

    for _ in 0..8 {
        player.tick();
    }
    assert_eq!(player.outcome(), Some(&TurnOutcome::Forfeited));
}

#[test]
fn test_cancel_through_trait_object() {
    let mut player: Box<dyn Player> = Box::new(HumanPlayer::new(
        Side::White,
        Box::new(ScriptedIntents::new(vec![Intent::MoveNorth; 20])),
        Box::new(StandardBoard),
        Box::new(AllowAll),
        Box::new(NullNotifier),
    ));

    player.start_move(Square::new(0, 0));
    player.tick();
    player.cancel();

    assert!(player.is_done());
    assert_eq!(player.outcome(), Some(&TurnOutcome::Cancelled));
    player.tick();
    assert_eq!(player.outcome(), Some(&TurnOutcome::Cancelled));
}

#[test]
fn test_turns_alternate_between_player_kinds() {
    let mut white: Box<dyn Player> = Box::new(HumanPlayer::new(
        Side::White,
        Box::new(ScriptedIntents::new(vec![
            Intent::StartSelection,
            Intent::MoveNorth,
            Intent::EndSelection,
        ])),
        Box::new(StandardBoard),
        Box::new(AllowAll),
        Box::new(NullNotifier),
    ));
    let mut black: Box<dyn Player> = Box::new(ScriptedPlayer::new(
        Side::Black,
        Square::new(1, 6),
        Square::new(1, 5),
    ));

    let mut moves = Vec::new();
    for player in [&mut white, &mut black] {
        player.start_move(Square::new(4, 1));
        while !player.is_done() {
            player.tick();
        }
        let mv = player
            .outcome()
            .and_then(|o| o.committed_move())
            .copied()
            .expect("both turns should commit");
        moves.push(mv);
    }

    assert_eq!(moves[0].side, Side::White);
    assert_eq!(moves[0].src, Square::new(4, 1));
    assert_eq!(moves[0].dst, Square::new(4, 2));
    assert_eq!(moves[1].side, Side::Black);
    assert_eq!(moves[1].src, Square::new(1, 6));
    assert_eq!(moves[1].dst, Square::new(1, 5));
}
