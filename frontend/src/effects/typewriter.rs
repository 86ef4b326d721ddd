use futures::future::{AbortHandle, Abortable};

use crate::page::{Clock, Page, PageError};

/// Cursor over the text being typed.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    index: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
        }
    }

    pub fn next_char(&mut self) -> Option<char> {
        let c = self.chars.get(self.index).copied()?;
        self.index += 1;
        Some(c)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.chars.len()
    }
}

pub struct TypewriterTiming {
    pub start_delay_ms: u32,
    pub char_delay_ms: u32,
}

/// Appends `text` to the element one character at a time. Existing content
/// is kept, so running it twice types the text twice.
pub async fn type_into<P: Page, C: Clock>(
    page: &P,
    clock: &C,
    target_id: &str,
    text: &str,
    timing: TypewriterTiming,
) -> Result<(), PageError> {
    let target = page.by_id(target_id)?;
    let mut cursor = Typewriter::new(text);

    clock.sleep(timing.start_delay_ms).await;
    while let Some(c) = cursor.next_char() {
        let mut buf = [0u8; 4];
        page.append_text(&target, c.encode_utf8(&mut buf))?;
        if !cursor.is_finished() {
            clock.sleep(timing.char_delay_ms).await;
        }
    }
    Ok(())
}

/// Wraps [`type_into`] so it can be stopped midway through the text.
pub fn cancellable<P, C>(
    page: P,
    clock: C,
    target_id: String,
    text: String,
    timing: TypewriterTiming,
) -> (impl std::future::Future<Output = ()>, AbortHandle)
where
    P: Page + 'static,
    C: Clock + 'static,
{
    let (handle, registration) = AbortHandle::new_pair();
    let task = Abortable::new(
        async move {
            if let Err(e) = type_into(&page, &clock, &target_id, &text, timing).await {
                log::warn!("Typewriter stopped: {}", e);
            }
        },
        registration,
    );
    let task = async move {
        if task.await.is_err() {
            log::debug!("Typewriter cancelled");
        }
    };
    (task, handle)
}
