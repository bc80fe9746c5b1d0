//! Renders a compiled document as a BIMcollab ZOOM smartview file (`.bcsv`).

use crate::error::ExportError;
use crate::smartview::document::{CompiledDocument, CompiledView};
use crate::smartview::rule::CompiledRule;
use chrono::NaiveDateTime;
use quick_xml::escape::escape;
use std::fmt::Write;
use std::fs::File;
use std::path::Path;

pub const FILE_EXTENSION: &str = "bcsv";

const FORMAT_VERSION: &str = "6";
const APPLICATION_VERSION: &str = "Win - Version: 9.2 (build 9.2.12.0)";
const INFORMATION_TAKEOFF: &str = "<INFORMATIONTAKEOFF><PROPERTYSETNAME>None</PROPERTYSETNAME>\
<PROPERTYNAME>None</PROPERTYNAME><OPERATION>0</OPERATION></INFORMATIONTAKEOFF>";
const EXPLODE_MODE: &str = "KeepParentsAndChildren";
const INDENT: &str = "    ";

fn line(out: &mut String, level: usize, text: &str) -> std::fmt::Result {
    writeln!(out, "{}{text}", INDENT.repeat(level))
}

fn timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Renders the full smartview file.
pub fn render(doc: &CompiledDocument) -> Result<String, ExportError> {
    let mut out = String::new();
    let modified = timestamp(&doc.modified);
    let title = escape(doc.title.as_str());

    line(&mut out, 0, r#"<?xml version="1.0"?>"#)?;
    line(&mut out, 0, "<bimcollabsmartviewfile>")?;
    line(&mut out, 1, &format!("<version>{FORMAT_VERSION}</version>"))?;
    line(
        &mut out,
        1,
        &format!("<applicationversion>{APPLICATION_VERSION}</applicationversion>"),
    )?;
    line(&mut out, 0, "</bimcollabsmartviewfile>")?;
    line(&mut out, 0, "<SMARTVIEWSETS>")?;
    line(&mut out, 1, "<SMARTVIEWSET>")?;
    line(&mut out, 2, &format!("<TITLE>{title}</TITLE>"))?;
    line(&mut out, 2, &format!("<DESCRIPTION>{title}</DESCRIPTION>"))?;
    line(&mut out, 2, &format!("<GUID>{}</GUID>", doc.guid))?;
    line(&mut out, 2, &format!("<MODIFICATIONDATE>{modified}</MODIFICATIONDATE>"))?;
    line(&mut out, 2, "<SMARTVIEWS>")?;

    for view in &doc.views {
        render_view(&mut out, view)?;
    }

    line(&mut out, 2, "</SMARTVIEWS>")?;
    line(&mut out, 1, "</SMARTVIEWSET>")?;
    line(&mut out, 0, "</SMARTVIEWSETS>")?;

    Ok(out)
}

fn render_view(out: &mut String, view: &CompiledView) -> std::fmt::Result {
    let creator = escape(view.creator.as_str());
    let stamp = timestamp(&view.timestamp);

    line(out, 3, "<SMARTVIEW>")?;
    line(out, 4, &format!("<TITLE>Bauzustand Phase {}</TITLE>", view.label))?;
    line(out, 4, "<DESCRIPTION></DESCRIPTION>")?;
    line(out, 4, &format!("<CREATOR>{creator}</CREATOR>"))?;
    line(out, 4, &format!("<CREATIONDATE>{stamp}</CREATIONDATE>"))?;
    line(out, 4, &format!("<MODIFIER>{creator}</MODIFIER>"))?;
    line(out, 4, &format!("<MODIFICATIONDATE>{stamp}</MODIFICATIONDATE>"))?;
    line(out, 4, &format!("<GUID>{}</GUID>", view.guid))?;
    line(out, 4, "<RULES>")?;
    for rule in &view.rules {
        line(out, 5, &render_rule(rule)?)?;
    }
    line(out, 4, "</RULES>")?;
    line(out, 4, INFORMATION_TAKEOFF)?;
    line(out, 4, &format!("<EXPLODEMODE>{EXPLODE_MODE}</EXPLODEMODE>"))?;
    line(out, 3, "</SMARTVIEW>")
}

/// One rule, on a single line.
fn render_rule(rule: &CompiledRule) -> Result<String, std::fmt::Error> {
    let mut s = String::new();
    write!(
        s,
        "<RULE><IFCTYPE>Any</IFCTYPE><PROPERTY><NAME>{}</NAME><PROPERTYSETNAME>{}</PROPERTYSETNAME>\
         <TYPE>PropertySet</TYPE><VALUETYPE>DoubleValue</VALUETYPE><UNIT>None</UNIT></PROPERTY>\
         <CONDITION><TYPE>{}</TYPE><VALUE>{}</VALUE></CONDITION><ACTION><TYPE>{}</TYPE>",
        escape(rule.binding.property.as_str()),
        escape(rule.binding.property_set.as_str()),
        rule.condition.as_str(),
        rule.threshold,
        rule.action.as_str(),
    )?;
    if let Some(c) = rule.action.color() {
        write!(s, "<R>{}</R><G>{}</G><B>{}</B><A>{}</A>", c.0, c.1, c.2, c.3)?;
    }
    s.push_str("</ACTION></RULE>");
    Ok(s)
}

/// Renders `doc` and writes it to `path`.
pub fn write_smartview<P: AsRef<Path>>(doc: &CompiledDocument, path: P) -> Result<(), ExportError> {
    use std::io::Write as _;

    let path_ref = path.as_ref();
    let content = render(doc)?;

    let mut file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    file.write_all(content.as_bytes())
        .map_err(|e| ExportError::WriteError {
            message: e.to_string(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyBinding;
    use crate::smartview::rule::{Action, ConditionKind, Threshold, LIGHT_GRAY};
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_rule_line() {
        let rule = CompiledRule::new(
            &PropertyBinding::new("CH_Ing_Uebergeordnet", "Bauphase"),
            ConditionKind::Equals,
            Threshold::Unset,
            Action::And(Some(LIGHT_GRAY)),
        );

        assert_eq!(
            render_rule(&rule).unwrap(),
            "<RULE><IFCTYPE>Any</IFCTYPE><PROPERTY><NAME>Bauphase</NAME>\
             <PROPERTYSETNAME>CH_Ing_Uebergeordnet</PROPERTYSETNAME><TYPE>PropertySet</TYPE>\
             <VALUETYPE>DoubleValue</VALUETYPE><UNIT>None</UNIT></PROPERTY><CONDITION>\
             <TYPE>Equals</TYPE><VALUE>0.00000000000</VALUE></CONDITION><ACTION>\
             <TYPE>And...</TYPE><R>204</R><G>204</G><B>204</B><A>255</A></ACTION></RULE>"
        );
    }

    #[test]
    fn escapes_property_names() {
        let rule = CompiledRule::new(
            &PropertyBinding::new("Phasen & Etappen", "Bau<1>"),
            ConditionKind::Less,
            Threshold::Phase(2.0),
            Action::Remove,
        );

        let rendered = render_rule(&rule).unwrap();
        assert!(rendered.contains("<NAME>Bau&lt;1&gt;</NAME>"));
        assert!(rendered.contains("<PROPERTYSETNAME>Phasen &amp; Etappen</PROPERTYSETNAME>"));
        assert!(rendered.ends_with("<ACTION><TYPE>Remove</TYPE></ACTION></RULE>"));
    }
}
