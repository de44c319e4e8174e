#[cfg(unix)]
mod pty_session {
    use autorespond::pty::PtySession;
    use autorespond::response::LineSink;
    use std::io;
    use std::thread;
    use std::time::Duration;

    fn spawn_script(script: &str) -> PtySession {
        PtySession::spawn("sh", &["-c".to_string(), script.to_string()])
            .expect("Failed to spawn sh")
    }

    #[test]
    fn pending_output_holds_the_prompt() {
        let mut session = spawn_script("printf 'Continue? [Y/n] '; read answer");
        thread::sleep(Duration::from_millis(300));

        let text = session
            .read_nonblocking(4096, Duration::from_secs(1))
            .expect("prompt should be pending");
        assert!(text.contains("Continue? [Y/n]"), "{text:?}");

        session.send_line("").expect("send should succeed");
        session.close().unwrap();
    }

    #[test]
    fn pending_output_is_read_once() {
        let mut session = spawn_script("printf ready; exec sleep 5");
        session
            .read_nonblocking(4096, Duration::from_secs(2))
            .expect("output should arrive");

        let err = session
            .read_nonblocking(4096, Duration::from_millis(100))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        session.close().unwrap();
    }

    #[test]
    fn silent_child_times_out() {
        let mut session = spawn_script("exec sleep 5");
        let err = session
            .read_nonblocking(4096, Duration::from_millis(200))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
        session.close().unwrap();
    }

    #[test]
    fn close_ends_a_running_child() {
        let mut session = spawn_script("exec sleep 30");
        session.close().unwrap();
        assert_eq!(session.exit_code(), None);
    }

    #[test]
    fn send_after_close_fails() {
        let mut session = spawn_script("exec sleep 30");
        session.close().unwrap();
        let err = session.send_line("a").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let result = PtySession::spawn("autorespond-no-such-program-xyz", &[]);
        assert!(result.is_err());
    }
}
