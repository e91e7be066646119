//! `linkfeed check` – validate link fields offline.

use anyhow::Result;
use linkfeed_core::form::{FieldKind, LinkForm};
use linkfeed_core::links::UrlSet;

use crate::cli::terminal::TerminalView;
use crate::cli::LinkArgs;

pub fn run_check(links: &LinkArgs) -> Result<()> {
    let (pdf, blog) = links.read()?;

    let mut form = LinkForm::new(TerminalView::stdio());
    form.input(FieldKind::Pdf, &pdf);
    form.input(FieldKind::Blog, &blog);
    // Both fields are filled now; re-check each against the other.
    let pdf_ok = form.check(FieldKind::Pdf).is_ok();
    let blog_ok = form.check(FieldKind::Blog).is_ok();

    let counts = [
        UrlSet::from_text(form.text(FieldKind::Pdf)).len(),
        UrlSet::from_text(form.text(FieldKind::Blog)).len(),
    ];
    let mut view = form.into_view();
    view.print_field_errors();

    if !(pdf_ok && blog_ok) {
        anyhow::bail!("link fields contain errors");
    }
    println!("{}: {} link(s) ok", FieldKind::Pdf, counts[0]);
    println!("{}: {} link(s) ok", FieldKind::Blog, counts[1]);
    Ok(())
}
