use crossterm::event::{self, Event, KeyCode};
use std::io::Write;
use std::time::Duration;

/// Startup strength menu. Digits pick a preset, Enter keeps the
/// configured value, q cancels the session.
pub fn select_skill_level(configured: u8) -> anyhow::Result<u8> {
    print!("\r\nSelect engine strength:\r\n");
    print!("1. Beginner (skill 1)\r\n");
    print!("2. Casual (skill 5)\r\n");
    print!("3. Club (skill 10)\r\n");
    print!("4. Strong (skill 15)\r\n");
    print!("5. Maximum (skill 20)\r\n");
    print!("Enter: keep configured ({})\r\n", configured);
    std::io::stdout().flush()?;

    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('1') => return Ok(1),
                    KeyCode::Char('2') => return Ok(5),
                    KeyCode::Char('3') => return Ok(10),
                    KeyCode::Char('4') => return Ok(15),
                    KeyCode::Char('5') => return Ok(20),
                    KeyCode::Enter => return Ok(configured),
                    KeyCode::Char('q') => return Err(anyhow::anyhow!("Canceled")),
                    _ => {}
                }
            }
        }
    }
}

/// Blocks until any key is pressed. Used on the end-of-game screen so
/// the final position stays visible.
pub fn wait_for_key() -> anyhow::Result<()> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(_) = event::read()? {
                return Ok(());
            }
        }
    }
}
