use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlMediaElement, Window};

use crate::config::{BoardDimensions, PageElements};
use crate::error::{ClientError, ClientResult};
use crate::surface::BoardSurface;
use crate::types::{SoundCue, Square};

use super::describe;

/// [`BoardSurface`] over the host page's DOM.
pub struct DomSurface {
    window: Window,
    document: Document,
    cells: HashMap<Square, Element>,
    elements: PageElements,
}

impl DomSurface {
    /// Collects the board cells matched by `elements.squares`.
    ///
    /// A cell's `data-row`/`data-col` attributes name its square; cells
    /// without them are placed by document order using the board width.
    pub fn attach(dims: BoardDimensions, elements: PageElements) -> ClientResult<Self> {
        let window = web_sys::window().ok_or_else(|| ClientError::host("no global `window`"))?;
        let document = window
            .document()
            .ok_or_else(|| ClientError::host("window has no document"))?;

        let nodes = document.query_selector_all(&elements.squares)?;
        let mut cells = HashMap::with_capacity(dims.len());
        for idx in 0..nodes.length() {
            let Some(cell) = nodes.item(idx).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let square = square_attrs(&cell).or_else(|| dims.square_at(idx as usize));
            match square {
                Some(square) => {
                    cells.insert(square, cell);
                }
                None => log::warn!("board cell #{idx} lies outside the {}x{} board", dims.rows, dims.cols),
            }
        }
        if cells.len() != dims.len() {
            log::warn!(
                "found {} board cells for a {}x{} board",
                cells.len(),
                dims.rows,
                dims.cols
            );
        }

        Ok(Self {
            window,
            document,
            cells,
            elements,
        })
    }

    /// Every resolved cell with its square.
    pub fn squares(&self) -> Vec<(Square, Element)> {
        self.cells.iter().map(|(sq, el)| (*sq, el.clone())).collect()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element_by_id(&self, id: &str) -> ClientResult<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| ClientError::host(format!("missing element #{id}")))
    }
}

fn square_attrs(cell: &Element) -> Option<Square> {
    let row = cell.get_attribute("data-row")?.parse().ok()?;
    let col = cell.get_attribute("data-col")?.parse().ok()?;
    Some(Square::new(row, col))
}

impl BoardSurface for DomSurface {
    fn has_square(&self, square: Square) -> bool {
        self.cells.contains_key(&square)
    }

    fn set_square_text(&mut self, square: Square, text: &str) -> ClientResult<()> {
        if let Some(cell) = self.cells.get(&square) {
            cell.set_text_content((!text.is_empty()).then_some(text));
        }
        Ok(())
    }

    fn add_class(&mut self, square: Square, class: &str) -> ClientResult<()> {
        if let Some(cell) = self.cells.get(&square) {
            cell.class_list().add_1(class)?;
        }
        Ok(())
    }

    fn remove_class(&mut self, square: Square, class: &str) -> ClientResult<()> {
        if let Some(cell) = self.cells.get(&square) {
            cell.class_list().remove_1(class)?;
        }
        Ok(())
    }

    fn set_status(&mut self, text: &str) -> ClientResult<()> {
        self.element_by_id(&self.elements.status)?
            .set_text_content(Some(text));
        Ok(())
    }

    fn replace_move_log(&mut self, entries: &[String]) -> ClientResult<()> {
        let list = self.element_by_id(&self.elements.move_list)?;
        list.set_inner_html("");
        for entry in entries {
            let item = self.document.create_element("li")?;
            item.set_text_content(Some(entry));
            list.append_child(&item)?;
        }
        Ok(())
    }

    fn play_sound(&mut self, cue: SoundCue) -> ClientResult<()> {
        let audio = self
            .element_by_id(&cue.element_id())?
            .dyn_into::<HtmlMediaElement>()
            .map_err(|_| ClientError::host(format!("#{} is not a media element", cue.element_id())))?;
        audio.set_current_time(0.0);
        let playing = audio.play()?;
        spawn_local(async move {
            if let Err(err) = JsFuture::from(playing).await {
                log::debug!("{} cue did not play: {}", cue.name(), describe(&err));
            }
        });
        Ok(())
    }

    fn show_notice(&mut self, text: &str, duration_ms: u32) -> ClientResult<()> {
        let notice = self.element_by_id(&self.elements.notice)?;
        notice.set_text_content(Some(text));

        let shown = text.to_string();
        let clear = Closure::once_into_js(move || {
            if notice.text_content().as_deref() == Some(shown.as_str()) {
                notice.set_text_content(None);
            }
        });
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                clear.unchecked_ref(),
                i32::try_from(duration_ms).unwrap_or(i32::MAX),
            )?;
        Ok(())
    }

    fn reload(&mut self) -> ClientResult<()> {
        self.window.location().reload()?;
        Ok(())
    }
}
