use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

const ENVIRONMENT: [&str; 8] = [
    "GITHUB_USER_NAME",
    "GITHUB_OUTPUT",
    "INPUT_OUTPUTS",
    "INPUT_THEME",
    "INPUT_GHOST_COUNT",
    "INPUT_ANIMATION_SPEED",
    "INPUT_SHOW_SCORE",
    "INPUT_MAZE_COMPLEXITY",
];

fn scratch_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR"))
        .join("cli_smoke")
        .join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch directory");
    dir
}

fn contrib_maze(args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_contrib-maze"));
    for variable in ENVIRONMENT {
        let _ = command.env_remove(variable);
    }
    command
        .env("NO_COLOR", "1")
        .args(args)
        .output()
        .expect("binary runs")
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn seeded_mock_run_writes_identical_documents() {
    let dir = scratch_dir("mock");
    let first = dir.join("first").join("maze.svg");
    let second = dir.join("second.svg");
    let step_output = dir.join("github_output");

    for target in [&first, &second] {
        let output = contrib_maze(&[
            "--login",
            "octocat",
            "--mock",
            "--seed",
            "7",
            "--theme",
            "neon",
            "--output",
            &path_arg(target),
            "--github-output",
            &path_arg(&step_output),
        ]);
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let svg = fs::read_to_string(&first).expect("document written");
    assert_eq!(svg, fs::read_to_string(&second).expect("document written"));

    let document = roxmltree::Document::parse(&svg).expect("well-formed svg");
    assert_eq!(document.root_element().attribute("width"), Some("800"));
    assert!(svg.contains("#000011"), "neon background applied");

    let outputs = fs::read_to_string(&step_output).expect("step output written");
    assert_eq!(
        outputs,
        format!(
            "svg_path={}\nsvg_path={}\n",
            first.display(),
            second.display()
        )
    );
}

#[test]
fn graphql_response_with_unknown_theme_still_renders() {
    let dir = scratch_dir("graphql");
    let calendar = dir.join("calendar.json");
    let config = dir.join("maze.toml");
    let target = dir.join("maze.svg");
    fs::write(
        &calendar,
        r##"{
  "data": {
    "user": {
      "contributionsCollection": {
        "contributionCalendar": {
          "totalContributions": 40,
          "weeks": [
            { "contributionDays": [
              { "contributionCount": 0, "date": "2024-01-07", "weekday": 0, "color": "#ebedf0" },
              { "contributionCount": 1, "date": "2024-01-08", "weekday": 1, "color": "#9be9a8" },
              { "contributionCount": 4, "date": "2024-01-09", "weekday": 2, "color": "#40c463" },
              { "contributionCount": 7, "date": "2024-01-10", "weekday": 3, "color": "#30a14e" },
              { "contributionCount": 10, "date": "2024-01-11", "weekday": 4, "color": "#216e39" },
              { "contributionCount": 15, "date": "2024-01-12", "weekday": 5, "color": "#216e39" },
              { "contributionCount": 3, "date": "2024-01-13", "weekday": 6, "color": "#9be9a8" }
            ] }
          ]
        }
      }
    }
  }
}"##,
    )
    .expect("calendar fixture");
    fs::write(
        &config,
        "[render]\nghost_count = 9\nmaze_complexity = \"simple\"\n",
    )
    .expect("config fixture");

    let output = contrib_maze(&[
        "--login",
        "octocat",
        "--name",
        "Mona <Lisa>",
        "--calendar",
        &path_arg(&calendar),
        "--config",
        &path_arg(&config),
        "--theme",
        "foo",
        "-o",
        &path_arg(&target),
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'foo'"), "fallback logged: {stderr}");
    assert!(stderr.contains("\"dotsEaten\":6"), "stats logged: {stderr}");

    let svg = fs::read_to_string(&target).expect("document written");
    let document = roxmltree::Document::parse(&svg).expect("well-formed svg");
    let ghosts = document
        .descendants()
        .filter(|node| {
            node.attribute("id")
                .is_some_and(|id| id.starts_with("ghost-path-"))
        })
        .count();
    assert_eq!(ghosts, 4);
    assert!(svg.contains("PLAYER: Mona &lt;Lisa&gt;"));
    assert!(svg.contains("SCORE: 60"));
}

#[test]
fn negative_counts_fail_without_writing() {
    let dir = scratch_dir("negative");
    let calendar = dir.join("calendar.json");
    let target = dir.join("maze.svg");
    let days: Vec<String> = (0..7)
        .map(|day| {
            let count = if day == 2 { -3 } else { 1 };
            format!(
                r#"{{ "contributionCount": {count}, "date": "2024-01-{:02}" }}"#,
                7 + day
            )
        })
        .collect();
    fs::write(
        &calendar,
        format!(
            r#"{{ "weeks": [ {{ "contributionDays": [{}] }} ] }}"#,
            days.join(", ")
        ),
    )
    .expect("calendar fixture");

    let output = contrib_maze(&[
        "--login",
        "octocat",
        "--calendar",
        &path_arg(&calendar),
        "--output",
        &path_arg(&target),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("is negative"),
        "error chain printed: {stderr}"
    );
    assert!(!target.exists());
}

#[test]
fn calendar_and_mock_are_mutually_exclusive() {
    let output = contrib_maze(&[
        "--login",
        "octocat",
        "--mock",
        "--calendar",
        "calendar.json",
    ]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_login_is_reported() {
    let dir = scratch_dir("no-login");
    let target = dir.join("maze.svg");
    let output = contrib_maze(&["--mock", "--output", &path_arg(&target)]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--login"));
    assert!(!target.exists());
}
