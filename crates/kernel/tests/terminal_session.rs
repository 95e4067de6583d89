use display::AnsiDisplay;
use hal_interface::LoopbackPort;
use kernel::{ConsoleFormatting, EscapeState, Terminal};
use std::cell::RefCell;

type SessionTerminal = Terminal<LoopbackPort<64, 1024>>;

thread_local! {
    static G_LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn collect_line(_p_term: &mut SessionTerminal, p_line: &str) {
    G_LINES.with(|l_lines| l_lines.borrow_mut().push(p_line.to_owned()));
}

/// Prints an answer, moving the cursor the way a real handler would.
fn answer_line(p_term: &mut SessionTerminal, p_line: &str) {
    collect_line(p_term, p_line);
    p_term.cursor_move_to(10, 10).unwrap();
    p_term
        .write(&ConsoleFormatting::StrNoFormatting("ok"))
        .unwrap();
}

fn lines() -> Vec<String> {
    G_LINES.with(|l_lines| l_lines.borrow_mut().drain(..).collect())
}

fn session(p_callback: fn(&mut SessionTerminal, &str)) -> SessionTerminal {
    let _ = lines();
    let mut l_term: SessionTerminal = Terminal::new(AnsiDisplay::new(LoopbackPort::new("UART0")));
    l_term.init(p_callback).unwrap();
    l_term.display_mut().port_mut().clear_transmitted();
    l_term
}

fn feed_all(p_term: &mut SessionTerminal, p_bytes: &[u8]) {
    for l_byte in p_bytes {
        p_term.feed(*l_byte).unwrap();
    }
}

#[test]
fn enter_delivers_line_and_moves_to_next_row() {
    let mut l_term = session(collect_line);
    feed_all(&mut l_term, b"hi\r");
    assert_eq!(lines(), vec!["hi".to_owned()]);
    assert_eq!(l_term.cursor_position(), (1, 0));
    assert_eq!(l_term.line(), "");
    assert_eq!(l_term.stats().completed_lines, 1);
    assert_eq!(
        l_term.display().port().transmitted(),
        b"hi\x1B[1;3H\r\n"
    );
}

#[test]
fn backspaced_bytes_are_not_delivered() {
    let mut l_term = session(collect_line);
    feed_all(&mut l_term, b"helo\x08lo\x7F\x7Flo world\n");
    assert_eq!(lines(), vec!["hello world".to_owned()]);
}

/// Small deterministic generator for input sequences.
struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.0 >> 16
    }
}

#[test]
fn generated_edits_deliver_typed_bytes_minus_erased_ones() {
    let mut l_rng = Lcg(42);
    for _ in 0..200 {
        let mut l_term = session(collect_line);
        let mut l_expected: Vec<u8> = Vec::new();
        let l_len = l_rng.next() % 140;

        for _ in 0..l_len {
            let l_byte = match l_rng.next() % 4 {
                0 if l_rng.next() % 2 == 0 => 8,
                0 => 127,
                _ => (32 + l_rng.next() % 95) as u8,
            };
            if l_byte == 8 || l_byte == 127 {
                l_expected.pop();
            } else if l_expected.len() < 79 {
                l_expected.push(l_byte);
            }
            l_term.feed(l_byte).unwrap();
            l_term.display_mut().port_mut().clear_transmitted();
            assert_eq!(l_term.line().as_bytes(), l_expected.as_slice());
            assert_eq!(l_term.cursor_position(), (0, l_expected.len() as u16));
        }

        l_term.feed(b'\r').unwrap();
        assert_eq!(lines(), vec![String::from_utf8(l_expected).unwrap()]);
        assert_eq!(l_term.line(), "");
        assert_eq!(l_term.cursor_position(), (1, 0));
    }
}

#[test]
fn empty_enter_delivers_empty_line() {
    let mut l_term = session(collect_line);
    feed_all(&mut l_term, b"\n");
    assert_eq!(lines(), vec![String::new()]);
    assert_eq!(l_term.cursor_position(), (1, 0));
}

#[test]
fn ctrl_c_does_not_deliver() {
    let mut l_term = session(collect_line);
    feed_all(&mut l_term, b"abc\x03def\r");
    assert_eq!(lines(), vec!["def".to_owned()]);
    assert_eq!(l_term.cursor_position(), (2, 0));
}

#[test]
fn callback_output_does_not_move_the_prompt() {
    let mut l_term = session(answer_line);
    feed_all(&mut l_term, b"cmd\r");
    assert_eq!(lines(), vec!["cmd".to_owned()]);
    assert_eq!(
        l_term.display().port().transmitted(),
        b"cmd\x1B[11;11Hok\x1B[1;4H\r\n"
    );
    assert_eq!(l_term.cursor_position(), (1, 0));
}

#[test]
fn line_holds_at_most_79_characters() {
    let mut l_term = session(collect_line);
    for _ in 0..100 {
        l_term.feed(b'x').unwrap();
    }
    assert_eq!(l_term.line().len(), 79);
    assert_eq!(l_term.stats().dropped_bytes, 21);
    assert_eq!(l_term.errors().counters().line_buffer_full, 21);
    assert_eq!(l_term.cursor_position(), (0, 79));

    l_term.feed(b'\r').unwrap();
    assert_eq!(lines(), vec!["x".repeat(79)]);
}

#[test]
fn up_arrow_is_clamped_at_top_row() {
    let mut l_term = session(collect_line);
    feed_all(&mut l_term, b"\x1B[A");
    assert_eq!(l_term.cursor_position(), (0, 0));

    feed_all(&mut l_term, b"\r\x1B[A");
    assert_eq!(l_term.cursor_position(), (0, 0));
    assert_eq!(l_term.escape_state(), EscapeState::Normal);
}

#[test]
fn unsupported_final_byte_leaves_state_unchanged() {
    let mut l_term = session(collect_line);
    feed_all(&mut l_term, b"ab");
    let l_before = l_term.cursor_position();
    feed_all(&mut l_term, b"\x1B[Z");
    assert_eq!(l_term.cursor_position(), l_before);
    assert_eq!(l_term.line(), "ab");
    assert_eq!(l_term.escape_state(), EscapeState::Normal);
    assert_eq!(l_term.display().port().transmitted(), b"ab");
}

#[test]
fn reinit_replaces_callback() {
    let mut l_term = session(answer_line);
    l_term.init(collect_line).unwrap();
    feed_all(&mut l_term, b"x\r");
    assert_eq!(lines(), vec!["x".to_owned()]);
    assert_eq!(l_term.stats().completed_lines, 1);
}

#[test]
fn bytes_are_read_from_the_port() {
    let mut l_term = session(collect_line);
    l_term.display_mut().port_mut().inject(b"ok").unwrap();
    assert_eq!(l_term.read_byte(), Some(b'o'));
    assert_eq!(l_term.read_byte(), Some(b'k'));
    assert_eq!(l_term.read_byte(), None);
}
