// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, help, and overlay helpers used by TUI rendering.
fn stack_main_panes_vertically(area: Rect) -> bool {
    area.width < 96
}

fn footer_uses_compact_mode(area: Rect) -> bool {
    stack_main_panes_vertically(area)
}

fn clamp_positive_i32_to_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Title,
    Isbn,
    Authors,
    Tags,
    Description,
    CoverUrl,
    Location,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Title => Self::Isbn,
            Self::Isbn => Self::Authors,
            Self::Authors => Self::Tags,
            Self::Tags => Self::Description,
            Self::Description => Self::CoverUrl,
            Self::CoverUrl => Self::Location,
            Self::Location => Self::Title,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::Title => Self::Location,
            Self::Isbn => Self::Title,
            Self::Authors => Self::Isbn,
            Self::Tags => Self::Authors,
            Self::Description => Self::Tags,
            Self::CoverUrl => Self::Description,
            Self::Location => Self::CoverUrl,
        }
    }
}

fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn form_label_span(label: &str, focused: bool, theme: &TuiTheme) -> Span<'static> {
    let text = format!("{label:<width$}", width = FORM_LABEL_WIDTH);
    if focused {
        Span::styled(text, theme.accent_style())
    } else {
        Span::styled(text, theme.dim_style())
    }
}

fn text_field_line(label: &str, value: &str, focused: bool, theme: &TuiTheme) -> Line<'static> {
    Line::from(vec![
        form_label_span(label, focused, theme),
        Span::raw(value.to_owned()),
    ])
}

fn chip_spans(widget: &TaggedMultiSelect, theme: &TuiTheme) -> Vec<Span<'static>> {
    let rows = widget.tag_rows();
    if rows.is_empty() {
        return vec![Span::styled("(none)".to_owned(), theme.dim_style())];
    }
    let mut spans = Vec::with_capacity(rows.len() * 2);
    for (index, row) in rows.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{} ×]", row.label), theme.chip_style()));
    }
    spans
}

/// Assembles the form panel's body plus, when a text cursor belongs on
/// screen, its (column, line) position within the panel interior.
fn form_lines(app: &App) -> (Vec<Line<'static>>, Option<(usize, usize)>) {
    let mut lines = Vec::<Line<'static>>::new();
    let mut cursor = None::<(usize, usize)>;

    push_draft_line(app, DraftField::Title, Focus::Title, &mut lines, &mut cursor);
    push_draft_line(app, DraftField::Isbn, Focus::Isbn, &mut lines, &mut cursor);
    push_multi_select_lines(app, Focus::Authors, &mut lines, &mut cursor);
    push_multi_select_lines(app, Focus::Tags, &mut lines, &mut cursor);
    push_draft_line(app, DraftField::Description, Focus::Description, &mut lines, &mut cursor);
    push_draft_line(app, DraftField::CoverUrl, Focus::CoverUrl, &mut lines, &mut cursor);

    (lines, cursor)
}

fn push_draft_line(
    app: &App,
    field: DraftField,
    focus: Focus,
    lines: &mut Vec<Line<'static>>,
    cursor: &mut Option<(usize, usize)>,
) {
    let value = app.form.draft().field(field);
    let focused = app.focus == focus;
    if focused {
        *cursor = Some((FORM_LABEL_WIDTH + value.chars().count(), lines.len()));
    }
    lines.push(text_field_line(field.label(), value, focused, &app.theme));
}

fn push_multi_select_lines(
    app: &App,
    focus: Focus,
    lines: &mut Vec<Line<'static>>,
    cursor: &mut Option<(usize, usize)>,
) {
    let (label, widget) = match focus {
        Focus::Tags => ("Tags", app.form.tags()),
        _ => ("Authors", app.form.authors()),
    };
    let focused = app.focus == focus;

    let mut spans = vec![form_label_span(label, focused, &app.theme)];
    spans.extend(chip_spans(widget, &app.theme));
    lines.push(Line::from(spans));

    if !focused {
        return;
    }

    let query_prefix = "  find: ";
    *cursor = Some((
        query_prefix.chars().count() + widget.query().chars().count(),
        lines.len(),
    ));
    lines.push(Line::from(vec![
        Span::styled(query_prefix.to_owned(), app.theme.dim_style()),
        Span::raw(widget.query().to_owned()),
    ]));

    if !widget.is_open() {
        return;
    }
    let rows = widget.option_rows();
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "    (no matches)".to_owned(),
            app.theme.dim_style(),
        )));
        return;
    }
    for row in rows {
        let style = if row.highlighted {
            app.theme.selection_style()
        } else {
            app.theme.base_style()
        };
        lines.push(Line::from(Span::styled(format!("    {}", row.label), style)));
    }
}

fn tree_marker_glyph(marker: TreeMarker) -> char {
    match marker {
        TreeMarker::Expanded => '▾',
        TreeMarker::Collapsed => '▸',
        TreeMarker::Leaf => '·',
    }
}

fn tree_row_line(row: &TreeRow, theme: &TuiTheme) -> Line<'static> {
    let head = format!("{}{} ", "  ".repeat(row.depth), tree_marker_glyph(row.marker));
    if row.selected {
        Line::from(vec![
            Span::raw(head),
            Span::styled(row.label.clone(), theme.accent_style()),
            Span::styled(" ✓".to_owned(), theme.accent_style()),
        ])
    } else {
        Line::from(vec![Span::raw(head), Span::raw(row.label.clone())])
    }
}

/// The submission preview: exactly what leaving the form would send.
fn card_lines(submission: &FormSubmission, theme: &TuiTheme) -> Vec<Line<'static>> {
    vec![
        card_line("title", submission.title.clone(), theme),
        card_line("isbn", submission.isbn.clone(), theme),
        card_line("authors", submission.authors.join(", "), theme),
        card_line("tags", submission.tags.join(", "), theme),
        card_line("description", submission.description.clone(), theme),
        card_line("cover_url", submission.cover_url.clone(), theme),
        card_line("location", submission.location.clone().unwrap_or_default(), theme),
    ]
}

fn card_line(key: &str, value: String, theme: &TuiTheme) -> Line<'static> {
    let value = if value.is_empty() { "—".to_owned() } else { value };
    Line::from(vec![
        Span::styled(format!("{key:<12}"), theme.dim_style()),
        Span::raw(value),
    ])
}

fn kind_heading(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Author => "Authors",
        EntityKind::Tag => "Tags",
    }
}

/// Builds the overlay body plus the display line its cursor row starts at,
/// so the renderer can keep the cursor in view.
fn overlay_lines(
    overlay: &DisambiguationOverlay,
    theme: &TuiTheme,
) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::<Line<'static>>::new();

    let Some(session) = overlay.session.as_ref() else {
        lines.push(Line::from(Span::styled(
            format!("{} name(s) could not be linked:", overlay.failures.len()),
            theme.error_style(),
        )));
        lines.push(Line::from(""));
        for failure in &overlay.failures {
            lines.push(Line::from(vec![
                Span::styled("  ✗ ".to_owned(), theme.error_style()),
                Span::raw(format!(
                    "{} \"{}\": {}",
                    failure.kind.as_str(),
                    failure.source_text,
                    failure.message
                )),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Enter or Esc closes".to_owned(),
            theme.dim_style(),
        )));
        return (lines, 0);
    };

    let mut cursor_line = 0;
    let mut row = 0;
    for kind in [EntityKind::Author, EntityKind::Tag] {
        if session.len(kind) == 0 {
            continue;
        }
        lines.push(Line::from(Span::styled(
            kind_heading(kind).to_owned(),
            theme.dim_style(),
        )));
        for index in 0..session.len(kind) {
            let (Some(item), Some(resolution)) =
                (session.item(kind, index), session.resolution(kind, index))
            else {
                continue;
            };
            let on_cursor = overlay.cursor == row;
            if on_cursor {
                cursor_line = lines.len();
            }
            let marker = if on_cursor { "❯ " } else { "  " };
            lines.push(Line::from(Span::styled(
                format!("{marker}\"{}\"", item.source_text()),
                if on_cursor { theme.selection_style() } else { theme.base_style() },
            )));
            lines.extend(resolution_lines(item, resolution, theme));
            row += 1;
        }
        lines.push(Line::from(""));
    }

    if overlay.on_apply_row() {
        cursor_line = lines.len();
    }
    lines.push(Line::from(Span::styled(
        format!("  [ Apply {} decision(s) ]", session.total_len()),
        if overlay.on_apply_row() { theme.selection_style() } else { theme.accent_style() },
    )));

    (lines, cursor_line)
}

fn resolution_lines(
    item: &UnresolvedItem,
    resolution: &Resolution,
    theme: &TuiTheme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for scored in item.candidates() {
        let chosen = matches!(
            resolution,
            Resolution::UseExisting(value) if value == scored.choice().value()
        );
        lines.push(resolution_line(
            chosen,
            format!("use {}", scored.choice().label()),
            Some(scored.score()),
            theme,
        ));
    }
    lines.push(resolution_line(
        matches!(resolution, Resolution::CreateNew(_)),
        format!("create \"{}\"", item.source_text()),
        None,
        theme,
    ));
    lines.push(resolution_line(matches!(resolution, Resolution::Ignore), "ignore".to_owned(), None, theme));
    lines
}

fn resolution_line(
    chosen: bool,
    text: String,
    score: Option<u8>,
    theme: &TuiTheme,
) -> Line<'static> {
    let (glyph, style) = if chosen {
        ('●', theme.accent_style())
    } else {
        ('○', theme.dim_style())
    };
    let mut spans = vec![Span::styled(format!("      {glyph} {text}"), style)];
    if let Some(score) = score {
        spans.push(Span::styled(format!("  {score}%"), theme.score_style()));
    }
    Line::from(spans)
}

fn render_disambiguation(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let Some(overlay) = app.disambiguation.as_ref() else {
        return;
    };

    let area = centered_rect(72, 78, main_area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Link names", None))
        .border_style(app.theme.panel_border_style(true))
        .style(app.theme.base_style());
    let viewport = block.inner(area).height.max(1) as usize;

    let (lines, cursor_line) = overlay_lines(overlay, &app.theme);
    let max_scroll = lines.len().saturating_sub(viewport);
    let scroll = cursor_line
        .saturating_sub(viewport / 2)
        .min(max_scroll)
        .min(u16::MAX as usize) as u16;

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(body, area);
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

fn help_kv(key: &str, description: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{key:<key_width$}"), key_style),
        Span::raw("  "),
        Span::raw(description.to_owned()),
    ])
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(78, 82, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();

    let entries: &[(&str, &[(&str, &str)])] = &[
        (
            "Global",
            &[
                ("Tab / Shift-Tab", "next / previous field"),
                ("F1", "toggle this help"),
                ("Esc", "quit (from a quiet field)"),
            ],
        ),
        (
            "Text fields",
            &[
                ("type / Bksp", "edit the value"),
                ("Enter", "on ISBN: look the book up and autofill"),
            ],
        ),
        (
            "Authors & Tags",
            &[
                ("type", "filter the dropdown"),
                ("↑ / ↓", "move the highlight"),
                ("Enter", "select the highlighted name"),
                ("Bksp", "erase the filter, then the last pick"),
                ("Esc", "close the dropdown"),
            ],
        ),
        (
            "Shelving",
            &[
                ("↑ / ↓, Home / End", "move the cursor"),
                ("Enter", "open a folded branch, else pick the spot"),
                ("Space", "fold / unfold a branch"),
                ("type / Bksp", "filter the tree"),
                ("Esc", "clear the filter"),
            ],
        ),
        (
            "Link names",
            &[
                ("↑ / ↓", "move between names"),
                ("← / →", "cycle use / create / ignore"),
                ("Enter", "apply (on the bottom row)"),
                ("Esc", "cancel without touching the form"),
            ],
        ),
    ];

    let key_width = entries
        .iter()
        .flat_map(|(_, rows)| rows.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (section, rows) in entries {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled((*section).to_owned(), header_style)));
        for &(key, description) in rows.iter() {
            lines.push(help_kv(key, description, key_width, key_style));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  j/k or ↑/↓ scroll, Esc or F1 closes".to_owned(),
        Style::default().fg(FOOTER_LABEL_COLOR),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(view_title("Help", None))
        .border_style(app.theme.panel_border_style(true))
        .style(app.theme.base_style());
    let viewport_height = block.inner(area).height;
    app.help_viewport_height = viewport_height;

    let max_scroll =
        clamp_positive_i32_to_u16(lines.len() as i32 - i32::from(viewport_height.max(1)));
    if app.help_scroll > max_scroll {
        app.help_scroll = max_scroll;
    }

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(body, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn footer_help_line(app: &App, toast: &str, compact: bool) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    if !compact {
        match app.focus {
            Focus::Title | Focus::Description | Focus::CoverUrl => {
                push_footer_entry(&mut spans, "EDIT", "type");
                push_footer_entry(&mut spans, "ERASE", "Bksp");
            }
            Focus::Isbn => {
                push_footer_entry(&mut spans, "EDIT", "type");
                push_footer_entry_maybe_disabled(
                    &mut spans,
                    "LOOKUP",
                    "Enter",
                    app.lookup_in_flight,
                );
            }
            Focus::Authors | Focus::Tags => {
                push_footer_entry(&mut spans, "FIND", "type");
                push_footer_entry(&mut spans, "PICK", "↑↓ Enter");
                push_footer_entry(&mut spans, "DROP", "Bksp");
                push_footer_entry(&mut spans, "CLOSE", "Esc");
            }
            Focus::Location => {
                push_footer_entry(&mut spans, "MOVE", "↑↓");
                push_footer_entry(&mut spans, "PICK", "Enter");
                push_footer_entry(&mut spans, "FOLD", "Space");
                push_footer_entry(&mut spans, "FILTER", "type");
            }
        }
    }
    push_footer_entry(&mut spans, "NEXT", "Tab");
    push_footer_entry(&mut spans, "HELP", "F1");
    push_footer_entry(&mut spans, "QUIT", "Esc");

    append_toast(&mut spans, toast);
    Line::from(spans)
}

fn overlay_footer_line(app: &App, toast: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let failures_shown = app
        .disambiguation
        .as_ref()
        .is_some_and(|overlay| overlay.session.is_none());
    if failures_shown {
        push_footer_entry(&mut spans, "CLOSE", "Enter/Esc");
    } else {
        push_footer_entry(&mut spans, "MOVE", "↑↓");
        push_footer_entry(&mut spans, "CHOOSE", "←→");
        push_footer_entry(&mut spans, "APPLY", "Enter");
        push_footer_entry(&mut spans, "CANCEL", "Esc");
    }
    append_toast(&mut spans, toast);
    Line::from(spans)
}

fn append_toast(spans: &mut Vec<Span<'static>>, toast: &str) {
    let toast = toast.trim();
    if toast.is_empty() {
        return;
    }
    spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    spans.push(Span::styled(toast.to_owned(), Style::default().fg(FOOTER_TOAST_COLOR)));
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
        }
        None => String::new(),
    }
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
    };
    vec![Span::styled(value.to_owned(), style)]
}

fn footer_brand_line() -> Line<'static> {
    Line::from(Span::styled(
        FOOTER_BRAND,
        Style::default().fg(FOOTER_BRAND_COLOR).add_modifier(Modifier::BOLD),
    ))
}
