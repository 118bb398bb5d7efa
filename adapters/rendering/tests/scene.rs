use chrono::{Days, NaiveDate};
use contrib_maze_core::{
    AnimationSpeed, GridCoord, MazeComplexity, NormalizedCalendar, PlayerInfo, RenderConfig,
    RenderOptions, Theme,
};
use contrib_maze_rendering::{compose_scene, Canvas, NoWalls, RandomWalls, WallSampler};
use contrib_maze_system_calendar::{normalize, RawCalendar, RawDay, RawWeek};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn calendar(weeks: &[[i64; 7]]) -> NormalizedCalendar {
    let start = NaiveDate::from_ymd_opt(2024, 1, 7).expect("valid date");
    let raw = RawCalendar {
        total_contributions: None,
        weeks: weeks
            .iter()
            .enumerate()
            .map(|(week, counts)| RawWeek {
                contribution_days: counts
                    .iter()
                    .enumerate()
                    .map(|(day, count)| RawDay {
                        contribution_count: *count,
                        date: start
                            .checked_add_days(Days::new((week * 7 + day) as u64))
                            .expect("date in range"),
                        weekday: None,
                        color: None,
                    })
                    .collect(),
            })
            .collect(),
    };
    normalize(&raw).expect("valid calendar")
}

fn player() -> PlayerInfo {
    PlayerInfo::new("octocat").expect("valid login")
}

#[test]
fn inactive_calendar_has_no_actors_but_keeps_scoreboard() {
    let calendar = calendar(&[[0; 7]]);
    let scene = compose_scene(&calendar, &player(), &RenderConfig::default(), &mut NoWalls);

    assert!(scene.plan.path.is_empty());
    assert!(scene.plan.consumed.is_empty());
    assert!(scene.chomper.is_none());
    assert!(scene.ghosts.is_empty());
    assert!(scene.dots.is_empty());
    assert!(scene.power_pellets.is_empty());

    let scoreboard = scene.scoreboard.expect("scoreboard enabled by default");
    assert_eq!(scoreboard.score.points(), 0);
    assert_eq!(scoreboard.score.level(), 1);
    assert_eq!(scoreboard.total_contributions, 0);
    assert_eq!(scoreboard.player, "octocat");
}

#[test]
fn mixed_week_emits_dots_and_power_pellets_for_busiest_days() {
    let calendar = calendar(&[[0, 1, 4, 7, 10, 15, 3]]);
    let scene = compose_scene(&calendar, &player(), &RenderConfig::default(), &mut NoWalls);

    assert_eq!(scene.plan.path.len(), 6);
    assert_eq!(scene.dots.len(), 6);
    let radii: Vec<f32> = scene.dots.iter().map(|dot| dot.radius).collect();
    assert_eq!(radii, vec![3.0, 4.0, 4.0, 4.0, 4.0, 3.0]);

    let pellets: Vec<usize> = scene
        .power_pellets
        .iter()
        .map(|pellet| pellet.record)
        .collect();
    assert_eq!(pellets, vec![4, 5]);

    let chomper = scene.chomper.expect("active calendar has a chomper");
    assert_eq!(chomper.route.len(), 6);
    assert!((chomper.duration_seconds - 1.2).abs() < 1e-5);
    assert_eq!(scene.ghosts.len(), 2);
    assert_eq!(scene.score.points(), 60);
}

#[test]
fn eaten_dots_fade_in_record_order() {
    let calendar = calendar(&[[0, 2, 0, 5, 0, 0, 0]]);
    let scene = compose_scene(&calendar, &player(), &RenderConfig::default(), &mut NoWalls);

    let fades: Vec<f32> = scene
        .dots
        .iter()
        .map(|dot| dot.eaten.expect("every visited dot is eaten").begin_seconds)
        .collect();
    assert!((fades[0] - 0.1).abs() < 1e-6);
    assert!((fades[1] - 0.3).abs() < 1e-6);
    assert!(scene.dots.iter().all(|dot| dot.opacity() == 0.0));
}

#[test]
fn ghost_count_is_clamped_to_four() {
    let options: RenderOptions = [("ghost_count", "9")].into_iter().collect();
    let config = RenderConfig::resolve(&options).config;
    let calendar = calendar(&[[1, 2, 3, 0, 0, 0, 0]]);
    let scene = compose_scene(&calendar, &player(), &config, &mut NoWalls);

    assert_eq!(scene.ghosts.len(), 4);
    let delays: Vec<f32> = scene
        .ghosts
        .iter()
        .map(|ghost| ghost.delay_seconds)
        .collect();
    assert_eq!(delays, vec![2.0, 4.0, 6.0, 8.0]);
    let colors: Vec<&str> = scene.ghosts.iter().map(|ghost| ghost.color).collect();
    assert_eq!(colors, Theme::Classic.palette().ghosts.to_vec());
    for ghost in &scene.ghosts {
        let chomper = scene.chomper.as_ref().expect("chomper present");
        assert_eq!(ghost.route[0], chomper.route[0] + ghost.offset);
        assert!((ghost.duration_seconds - (0.6 + ghost.delay_seconds)).abs() < 1e-5);
    }
}

#[test]
fn animation_speed_scales_lap_duration() {
    let calendar = calendar(&[[1, 1, 1, 1, 1, 0, 0]]);
    let slow = RenderConfig::default().with_animation_speed(AnimationSpeed::Slow);
    let fast = RenderConfig::default().with_animation_speed(AnimationSpeed::Fast);

    let slow_scene = compose_scene(&calendar, &player(), &slow, &mut NoWalls);
    let fast_scene = compose_scene(&calendar, &player(), &fast, &mut NoWalls);

    let slow_lap = slow_scene.chomper.expect("chomper").duration_seconds;
    let fast_lap = fast_scene.chomper.expect("chomper").duration_seconds;
    assert!((slow_lap - 2.0).abs() < 1e-5);
    assert!((fast_lap - 0.5).abs() < 1e-5);
}

#[test]
fn disabled_scoreboard_is_absent() {
    let config = RenderConfig::default().with_show_score(false);
    let scene = compose_scene(&calendar(&[[3; 7]]), &player(), &config, &mut NoWalls);

    assert!(scene.scoreboard.is_none());
}

#[test]
fn walls_never_change_route_consumption_or_score() {
    let calendar = calendar(&[
        [0, 3, 0, 1, 0, 0, 12],
        [2, 0, 0, 0, 5, 0, 0],
        [0, 0, 0, 0, 0, 0, 0],
    ]);
    let config = RenderConfig::default().with_maze_complexity(MazeComplexity::Complex);

    let bare = compose_scene(&calendar, &player(), &config, &mut NoWalls);
    let mut everywhere = |_: MazeComplexity, _: GridCoord| true;
    let walled = compose_scene(&calendar, &player(), &config, &mut everywhere);
    let mut random = RandomWalls::new(ChaCha8Rng::seed_from_u64(99));
    let sampled = compose_scene(&calendar, &player(), &config, &mut random);

    assert!(bare.walls.is_empty());
    assert_eq!(walled.walls.len(), 3 * 7);
    for scene in [&walled, &sampled] {
        assert_eq!(scene.plan, bare.plan);
        assert_eq!(scene.score, bare.score);
        assert_eq!(scene.dots, bare.dots);
        assert_eq!(scene.power_pellets, bare.power_pellets);
        assert_eq!(scene.chomper, bare.chomper);
        assert_eq!(scene.ghosts, bare.ghosts);
    }
}

#[test]
fn simple_mazes_never_sample_walls() {
    let mut sampler = RandomWalls::new(ChaCha8Rng::seed_from_u64(5));
    for column in 0..60 {
        for row in 0..7 {
            assert!(!sampler.place_wall(MazeComplexity::Simple, GridCoord::new(column, row)));
        }
    }
}

#[test]
fn wall_span_is_empty_without_records() {
    let calendar = calendar(&[]);
    let mut everywhere = |_: MazeComplexity, _: GridCoord| true;
    let scene = compose_scene(
        &calendar,
        &player(),
        &RenderConfig::default(),
        &mut everywhere,
    );

    assert!(scene.walls.is_empty());
    assert_eq!(scene.canvas, Canvas::for_weeks(0));
}

#[test]
fn canvas_tracks_week_count() {
    let weeks: Vec<[i64; 7]> = (0..104).map(|_| [0; 7]).collect();
    let scene = compose_scene(
        &calendar(&weeks),
        &player(),
        &RenderConfig::default(),
        &mut NoWalls,
    );

    assert_eq!(scene.canvas.width, 104 * 12 + 100);
    assert_eq!(scene.canvas.height, 400);
}
