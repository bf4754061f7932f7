#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct NameWidth(usize);

impl NameWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        if width >= 1 {
            Ok(NameWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct DescriptionWidth(usize);

impl DescriptionWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // description must be at least 2 (so we can hyphenate)
        if width >= 2 {
            Ok(DescriptionWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TotalWidth(pub usize);

/// Lays out `name  description` rows, wrapping the description column.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    name: NameWidth,
    description: DescriptionWidth,
}

// Target 95% of the total width.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Enough for three 5 letter words with spaces between them.
pub(crate) const MINIMUM_DESCRIPTION_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer which fits the rows to `total_width`, when possible.
    pub(crate) fn guided(
        padding: PaddingWidth,
        name: NameWidth,
        description: DescriptionWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_description = name.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_description = std::cmp::max(description.0, MINIMUM_DESCRIPTION_WIDTH);

        let selected = if guided_description + non_description <= target_total_width {
            guided_description
        } else if non_description < total_width.0 {
            std::cmp::max(total_width.0 - non_description, MINIMUM_DESCRIPTION_WIDTH)
        } else {
            MINIMUM_DESCRIPTION_WIDTH
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Name column {non_description} within total {}: selecting description width {selected}.",
                total_width.0
            );
        }

        Self::new(padding, name, DescriptionWidth(selected))
    }

    pub(crate) fn new(padding: PaddingWidth, name: NameWidth, description: DescriptionWidth) -> Self {
        Self {
            padding,
            name,
            description,
        }
    }

    pub(crate) fn render(&self, indent: usize, name: &str, description: &str) -> Vec<String> {
        let padding = self.padding.0;
        let name_width = self.name.0;
        let parts = chunk(description, self.description.0);

        if parts.is_empty() {
            return vec![format!("{:indent$}{name}", "")];
        }

        parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let left = if i == 0 { name } else { "" };
                format!("{:indent$}{left:name_width$}{:padding$}{part}", "", "")
            })
            .collect()
    }
}

/// Break the `paragraph` into lines no wider than `width` characters.
/// Words longer than the width are hyphenated.
pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if length(&current) + length(word) + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width.saturating_sub(1).max(1);
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

fn length(text: &str) -> usize {
    text.chars().count()
}
