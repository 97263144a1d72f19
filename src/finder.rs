use crate::error::{CaptureError, Result};
use crate::shell::{CommandRunner, checked};
use crate::types::{CaptureTarget, ProcessEntry, WindowRecord};

/// JXA snippet dumping every window the compositor knows about, on- and
/// off-screen, as JSON.
const WINDOW_LIST_SCRIPT: &str = "ObjC.import('CoreGraphics');\
JSON.stringify(ObjC.deepUnwrap(ObjC.castRefToObject(\
$.CGWindowListCopyWindowInfo($.kCGWindowListOptionAll, $.kCGNullWindowID))))";

fn parse_ps_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

pub fn find_process(
    runner: &mut dyn CommandRunner,
    name: &str,
    markers: &[&str],
) -> Result<ProcessEntry> {
    let output = checked(runner, "ps", &["aux"])?;
    for line in output.stdout.lines() {
        if !markers.iter().all(|marker| line.contains(marker)) {
            continue;
        }
        let Some(pid) = parse_ps_line(line) else {
            log::warn!("skipping ps line without a pid: {line}");
            continue;
        };
        return Ok(ProcessEntry {
            pid,
            line: line.to_string(),
        });
    }
    Err(CaptureError::ProcessNotFound {
        name: name.to_string(),
    })
}

pub fn list_windows(runner: &mut dyn CommandRunner) -> Result<Vec<WindowRecord>> {
    let output = checked(runner, "osascript", &["-l", "JavaScript", "-e", WINDOW_LIST_SCRIPT])?;
    let text = output.stdout.trim();
    if text.is_empty() || text == "null" {
        return Err(CaptureError::WindowListUnavailable);
    }
    let windows: Vec<WindowRecord> = serde_json::from_str(text)?;
    if windows.is_empty() {
        return Err(CaptureError::WindowListUnavailable);
    }
    log::debug!("window server reported {} windows", windows.len());
    Ok(windows)
}

pub fn select_window<'a>(
    windows: &'a [WindowRecord],
    pid: u32,
    title: &str,
) -> Option<&'a WindowRecord> {
    windows
        .iter()
        .find(|window| window.owner_pid == pid && window.name().contains(title))
}

pub fn find_window_id(runner: &mut dyn CommandRunner, target: &CaptureTarget) -> Result<u64> {
    let process = find_process(runner, target.name, target.process_markers)?;
    println!("Found {} Java process: PID {}", target.name, process.pid);

    let windows = list_windows(runner)?;
    let window = select_window(&windows, process.pid, target.title)
        .ok_or(CaptureError::WindowNotFound { pid: process.pid })?;

    println!("Found {} window:", target.name);
    println!("  - Window ID: {}", window.id);
    println!("  - Window Name: {}", window.name());
    println!("  - PID: {}", window.owner_pid);
    Ok(window.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::fake::ScriptedRunner;

    const PS_OUTPUT: &str = "\
USER       PID  %CPU %MEM      VSZ    RSS   TT  STAT STARTED      TIME COMMAND
dev        311   0.0  0.1  4100000  12000   ??  S     9:00AM   0:00.10 /usr/sbin/cfprefsd agent
dev       4242   3.1  2.5  9000000 400000   ??  S     9:01AM   0:12.00 /usr/bin/java -cp app.jar MainKt
";

    fn windows_json() -> String {
        serde_json::json!([
            {"kCGWindowOwnerPID": 311, "kCGWindowNumber": 5, "kCGWindowName": "BossTerm"},
            {"kCGWindowOwnerPID": 4242, "kCGWindowNumber": 77},
            {"kCGWindowOwnerPID": 4242, "kCGWindowNumber": 91, "kCGWindowName": "BossTerm - zsh"}
        ])
        .to_string()
    }

    #[test]
    fn finds_window_of_matching_process() {
        let mut runner = ScriptedRunner::default()
            .reply("ps", PS_OUTPUT)
            .reply("osascript", &windows_json());
        let id = find_window_id(&mut runner, &CaptureTarget::bossterm()).unwrap();
        assert_eq!(id, 91);
        assert_eq!(runner.programs(), vec!["ps", "osascript"]);
    }

    #[test]
    fn missing_process_skips_window_query() {
        let mut runner = ScriptedRunner::default()
            .reply("ps", "USER PID COMMAND\ndev 1 /sbin/launchd\n")
            .reply("osascript", &windows_json());
        let err = find_window_id(&mut runner, &CaptureTarget::bossterm()).unwrap_err();
        assert!(matches!(err, CaptureError::ProcessNotFound { .. }));
        assert!(err.is_lookup());
        assert_eq!(runner.programs(), vec!["ps"]);
    }

    #[test]
    fn first_matching_process_wins() {
        let ps = "dev 10 java MainKt\ndev 20 java MainKt\n";
        let mut runner = ScriptedRunner::default().reply("ps", ps);
        let process = find_process(&mut runner, "BossTerm", &["MainKt", "java"]).unwrap();
        assert_eq!(process.pid, 10);
    }

    #[test]
    fn process_needs_every_marker() {
        let ps = "dev 10 /usr/bin/java -jar gradle.jar\ndev 11 kotlinc MainKt.kt\n";
        let mut runner = ScriptedRunner::default().reply("ps", ps);
        assert!(find_process(&mut runner, "BossTerm", &["MainKt", "java"]).is_err());
    }

    #[test]
    fn window_title_must_match() {
        let mut runner = ScriptedRunner::default()
            .reply("ps", PS_OUTPUT)
            .reply("osascript", &windows_json());
        let err = find_window_id(&mut runner, &CaptureTarget::jediterm()).unwrap_err();
        assert!(matches!(err, CaptureError::WindowNotFound { pid: 4242 }));
    }

    #[test]
    fn empty_window_list_is_a_lookup_failure() {
        let mut runner = ScriptedRunner::default().reply("osascript", "null\n");
        let err = list_windows(&mut runner).unwrap_err();
        assert!(matches!(err, CaptureError::WindowListUnavailable));
    }

    #[test]
    fn unparsable_pid_line_is_skipped() {
        let ps = "dev abc java MainKt\ndev 42 java MainKt\n";
        let mut runner = ScriptedRunner::default().reply("ps", ps);
        let process = find_process(&mut runner, "BossTerm", &["MainKt", "java"]).unwrap();
        assert_eq!(process.pid, 42);
        assert_eq!(process.line, "dev 42 java MainKt");
    }

    #[test]
    fn malformed_window_dump_is_a_command_failure() {
        let mut runner = ScriptedRunner::default().reply("osascript", "{not json");
        let err = list_windows(&mut runner).unwrap_err();
        assert!(matches!(err, CaptureError::WindowListParse(_)));
        assert!(!err.is_lookup());
    }

    #[test]
    fn select_window_takes_first_match() {
        let windows: Vec<WindowRecord> = serde_json::from_str(
            r#"[{"kCGWindowOwnerPID": 7, "kCGWindowNumber": 1, "kCGWindowName": "JediTerm"},
                {"kCGWindowOwnerPID": 7, "kCGWindowNumber": 2, "kCGWindowName": "JediTerm 2"}]"#,
        )
        .unwrap();
        assert_eq!(select_window(&windows, 7, "JediTerm").map(|w| w.id), Some(1));
        assert!(select_window(&windows, 8, "JediTerm").is_none());
    }
}
