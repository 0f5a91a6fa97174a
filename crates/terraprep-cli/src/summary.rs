use std::path::Path;

use console::Style;
use terraprep_core::config::AlignParams;
use terraprep_core::mask::MaskFilterStats;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_align_summary(reference: &Path, target: &Path, params: &AlignParams) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Shift Search"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Reference"),
        s.path.apply_to(reference.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Target"),
        s.path.apply_to(target.display())
    );
    println!();

    println!("  {}", s.header.apply_to("Window"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Origin"),
        s.value
            .apply_to(format!("({}, {})", params.start_x, params.start_y))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{} px", params.window_size))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Range"),
        s.value.apply_to(format!("\u{b1}{} px", params.shift_range))
    );
    println!();
}

pub fn print_mask_filter_summary(files: usize, stats: &MaskFilterStats) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Mask Filter"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Files"),
        s.value.apply_to(files)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Components"),
        s.value.apply_to(stats.total)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Kept"),
        s.value.apply_to(stats.kept)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Dropped px"),
        s.value.apply_to(stats.dropped_area)
    );
    println!();
}
