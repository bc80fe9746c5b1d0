use chrono::NaiveDate;
use ifc_bauzustand::error::RunError;
use ifc_bauzustand::model::{Attribution, BindingSelection, PropertyBinding};
use ifc_bauzustand::phase::PhaseTimeline;
use ifc_bauzustand::session::{RunRequest, Session};
use ifc_bauzustand::smartview::{compile, render, CompiledDocument, Provenance};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PHASED_MODEL: &str = "ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [ReferenceView]'),'2;1');
FILE_NAME('phased.ifc','2024-03-01T10:00:00',(''),(''),'','','');
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCWALL('0wall0000000000000001',$,'Bestandswand',$,$,$,$,$,$);
#2=IFCWALL('0wall0000000000000002',$,'Neue Wand',$,$,$,$,$,$);
#3=IFCSLAB('0slab0000000000000001',$,'Decke',$,$,$,$,$,$);
#10=IFCPROPERTYSINGLEVALUE('Bauphase',$,IFCINTEGER(0),$);
#11=IFCPROPERTYSINGLEVALUE('Bauphase',$,IFCREAL(1.),$);
#12=IFCPROPERTYSINGLEVALUE('Rueckbauphase',$,IFCLABEL('3'),$);
#13=IFCPROPERTYSINGLEVALUE('Bemerkung',$,IFCTEXT('kein Wert'),$);
#20=IFCPROPERTYSET('1pset0000000000000001',$,'CH_Ing_Uebergeordnet',$,(#10));
#21=IFCPROPERTYSET('1pset0000000000000002',$,'CH_Ing_Uebergeordnet',$,(#11,#12,#13));
#22=IFCPROPERTYSET('1pset0000000000000003',$,'Pset_WallCommon',$,(#13));
#30=IFCRELDEFINESBYPROPERTIES('2rel00000000000000001',$,$,$,(#1),#20);
#31=IFCRELDEFINESBYPROPERTIES('2rel00000000000000002',$,$,$,(#2,#3),#21);
#32=IFCRELDEFINESBYPROPERTIES('2rel00000000000000003',$,$,$,(#1,#2),#22);
ENDSEC;
END-ISO-10303-21;
";

const UNPHASED_MODEL: &str = "ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC2X3'));
ENDSEC;
DATA;
#1=IFCWALL('0wall0000000000000001',$,'Wand',$,$,$,$,$);
#10=IFCPROPERTYSINGLEVALUE('IsExternal',$,IFCBOOLEAN(.T.),$);
#20=IFCPROPERTYSET('1pset0000000000000001',$,'Pset_WallCommon',$,(#10));
#30=IFCRELDEFINESBYPROPERTIES('2rel00000000000000001',$,$,$,(#1),#20);
ENDSEC;
END-ISO-10303-21;
";

fn write_model(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn fixed_provenance() -> Provenance {
    Provenance {
        creator: "jdoe".to_string(),
        timestamp: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap(),
    }
}

fn standard_request(output: PathBuf) -> RunRequest {
    RunRequest {
        output: Some(output),
        attribution: Attribution::Standard,
        title: None,
    }
}

fn titles(content: &str) -> Vec<&str> {
    content
        .lines()
        .filter_map(|l| l.trim().strip_prefix("<TITLE>Bauzustand Phase "))
        .filter_map(|l| l.strip_suffix("</TITLE>"))
        .collect()
}

#[test]
fn golden_single_bestand_view() {
    let timeline = PhaseTimeline::from_tags([0.0]).unwrap();
    let bau = PropertyBinding::new("CH_Ing_Uebergeordnet", "Bauphase");
    let rueck = PropertyBinding::new("CH_Ing_Uebergeordnet", "Rueckbauphase");
    let views = compile(&timeline, &[bau], &[rueck]);

    let mut next = 0u128;
    let doc = CompiledDocument::assemble(views, &fixed_provenance(), || {
        next += 1;
        Uuid::from_u128(next)
    });

    let expected = r#"<?xml version="1.0"?>
<bimcollabsmartviewfile>
    <version>6</version>
    <applicationversion>Win - Version: 9.2 (build 9.2.12.0)</applicationversion>
</bimcollabsmartviewfile>
<SMARTVIEWSETS>
    <SMARTVIEWSET>
        <TITLE>UC_Modellbasierte_Darstellung_Bauzustand</TITLE>
        <DESCRIPTION>UC_Modellbasierte_Darstellung_Bauzustand</DESCRIPTION>
        <GUID>00000000-0000-0000-0000-000000000001</GUID>
        <MODIFICATIONDATE>2024-03-01T14:30:05</MODIFICATIONDATE>
        <SMARTVIEWS>
            <SMARTVIEW>
                <TITLE>Bauzustand Phase Bestand</TITLE>
                <DESCRIPTION></DESCRIPTION>
                <CREATOR>jdoe</CREATOR>
                <CREATIONDATE>2024-03-01T14:30:05</CREATIONDATE>
                <MODIFIER>jdoe</MODIFIER>
                <MODIFICATIONDATE>2024-03-01T14:30:05</MODIFICATIONDATE>
                <GUID>00000000-0000-0000-0000-000000000002</GUID>
                <RULES>
                    <RULE><IFCTYPE>Any</IFCTYPE><PROPERTY><NAME>Bauphase</NAME><PROPERTYSETNAME>CH_Ing_Uebergeordnet</PROPERTYSETNAME><TYPE>PropertySet</TYPE><VALUETYPE>DoubleValue</VALUETYPE><UNIT>None</UNIT></PROPERTY><CONDITION><TYPE>Equals</TYPE><VALUE>0.0</VALUE></CONDITION><ACTION><TYPE>AddSetColored</TYPE><R>204</R><G>204</G><B>204</B><A>255</A></ACTION></RULE>
                </RULES>
                <INFORMATIONTAKEOFF><PROPERTYSETNAME>None</PROPERTYSETNAME><PROPERTYNAME>None</PROPERTYNAME><OPERATION>0</OPERATION></INFORMATIONTAKEOFF>
                <EXPLODEMODE>KeepParentsAndChildren</EXPLODEMODE>
            </SMARTVIEW>
        </SMARTVIEWS>
    </SMARTVIEWSET>
</SMARTVIEWSETS>
"#;

    assert_eq!(render(&doc).unwrap(), expected);
}

#[test]
fn run_writes_one_view_per_phase() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path(), "phased.ifc", PHASED_MODEL);

    let mut session = Session::new();
    session.add_file(&model).unwrap();

    let summary = session
        .run(&standard_request(dir.path().join("out")), &fixed_provenance())
        .unwrap();

    assert_eq!(summary.output, dir.path().join("out.bcsv"));
    assert_eq!(summary.timeline.phases(), &[0.0, 1.0, 3.0, 4.0]);
    assert_eq!(summary.views, 4);
    // Bestand: one rule; every other view: 4 + 3 + 4.
    assert_eq!(summary.rules, 1 + 3 * 11);

    let content = std::fs::read_to_string(&summary.output).unwrap();
    assert_eq!(titles(&content), vec!["Bestand", "1", "3", "Endzustand"]);
    assert_eq!(content.matches("<RULE>").count(), summary.rules);
    assert!(content.contains("<CONDITION><TYPE>Equals</TYPE><VALUE>3.0</VALUE></CONDITION><ACTION><TYPE>AddSetColored</TYPE><R>255</R><G>249</G><B>10</B><A>255</A>"));
}

#[test]
fn custom_title_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path(), "phased.ifc", PHASED_MODEL);

    let mut session = Session::new();
    session.add_file(&model).unwrap();

    let request = RunRequest {
        title: Some("Etappen <A & B>".to_string()),
        ..standard_request(dir.path().join("titled.bcsv"))
    };
    let summary = session.run(&request, &fixed_provenance()).unwrap();

    let content = std::fs::read_to_string(summary.output).unwrap();
    assert!(content.contains("<TITLE>Etappen &lt;A &amp; B&gt;</TITLE>"));
}

#[test]
fn reruns_differ_only_in_ids() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path(), "phased.ifc", PHASED_MODEL);

    let mut session = Session::new();
    session.add_file(&model).unwrap();

    let first = session
        .run(&standard_request(dir.path().join("a.bcsv")), &fixed_provenance())
        .unwrap();
    let second = session
        .run(&standard_request(dir.path().join("b.bcsv")), &fixed_provenance())
        .unwrap();

    let without_ids = |path: &Path| -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .filter(|l| !l.trim_start().starts_with("<GUID>"))
            .map(str::to_string)
            .collect()
    };
    assert_eq!(without_ids(&first.output), without_ids(&second.output));
}

#[test]
fn no_phases_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path(), "plain.ifc", UNPHASED_MODEL);
    let output = dir.path().join("empty.bcsv");

    let mut session = Session::new();
    session.add_file(&model).unwrap();

    let result = session.run(&standard_request(output.clone()), &fixed_provenance());
    assert!(matches!(result, Err(RunError::NoPhasesFound)));
    assert!(!output.exists());
}

#[test]
fn unreadable_files_are_skipped_during_run() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path(), "phased.ifc", PHASED_MODEL);

    let mut session = Session::new();
    assert!(session.add_file(dir.path().join("gone.ifc")).is_err());
    session.add_file(&model).unwrap();
    assert_eq!(session.files().len(), 2);

    let summary = session
        .run(&standard_request(dir.path().join("out.bcsv")), &fixed_provenance())
        .unwrap();
    assert_eq!(summary.views, 4);
}

#[test]
fn custom_selection_filters_property_sets() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path(), "phased.ifc", PHASED_MODEL);

    let mut session = Session::new();
    session.add_file(&model).unwrap();

    // Bauphase only lives in CH_Ing_Uebergeordnet.
    let request = RunRequest {
        attribution: Attribution::Custom(BindingSelection {
            property_sets: vec!["Pset_WallCommon".to_string()],
            construction_properties: vec!["Bauphase".to_string()],
            demolition_properties: vec!["Rueckbauphase".to_string()],
        }),
        ..standard_request(dir.path().join("custom.bcsv"))
    };

    let result = session.run(&request, &fixed_provenance());
    assert!(matches!(result, Err(RunError::NoPhasesFound)));
}

#[test]
fn catalog_spans_files_and_resets() {
    let dir = tempfile::tempdir().unwrap();
    let phased = write_model(dir.path(), "phased.ifc", PHASED_MODEL);
    let plain = write_model(dir.path(), "plain.ifc", UNPHASED_MODEL);

    let mut session = Session::new();
    session.add_file(&phased).unwrap();
    session.add_file(&plain).unwrap();
    session.add_file(&phased).unwrap();

    assert_eq!(session.files().len(), 2);
    assert!(session.schema(&phased).unwrap().is_ifc4());
    assert!(session.schema(&plain).unwrap().is_ifc2x3());

    let entries: Vec<(&str, &str)> = session.catalog().entries().collect();
    assert_eq!(
        entries,
        vec![
            ("CH_Ing_Uebergeordnet", "Bauphase"),
            ("CH_Ing_Uebergeordnet", "Bemerkung"),
            ("CH_Ing_Uebergeordnet", "Rueckbauphase"),
            ("Pset_WallCommon", "Bemerkung"),
            ("Pset_WallCommon", "IsExternal"),
        ]
    );

    session.clear();
    assert!(session.files().is_empty());
    assert!(session.catalog().is_empty());
}

const SENSOR_MODEL: &str = "ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCWALL('0wall0000000000000001',$,'Wand',$,$,$,$,$,$);
#2=IFCSENSOR('0sens0000000000000001',$,'Fuehler',$,$,$,$,$,.TEMPERATURESENSOR.);
#10=IFCPROPERTYSINGLEVALUE('Bauphase',$,IFCINTEGER(1),$);
#11=IFCPROPERTYSINGLEVALUE('Bauphase',$,IFCINTEGER(2),$);
#20=IFCPROPERTYSET('1pset0000000000000001',$,'CH_Ing_Uebergeordnet',$,(#10));
#21=IFCPROPERTYSET('1pset0000000000000002',$,'Pset_SensorPhase',$,(#11));
#22=IFCPROPERTYSET('1pset0000000000000003',$,'CH_Ing_Uebergeordnet',$,(#11));
#30=IFCRELDEFINESBYPROPERTIES('2rel00000000000000001',$,$,$,(#1),#20);
#31=IFCRELDEFINESBYPROPERTIES('2rel00000000000000002',$,$,$,(#2),#21);
#32=IFCRELDEFINESBYPROPERTIES('2rel00000000000000003',$,$,$,(#2),#22);
ENDSEC;
END-ISO-10303-21;
";

#[test]
fn sensor_phases_reach_catalog_and_views() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path(), "sensor.ifc", SENSOR_MODEL);

    let mut session = Session::new();
    session.add_file(&model).unwrap();

    assert!(session.catalog().property_sets().any(|p| p == "Pset_SensorPhase"));

    let summary = session
        .run(&standard_request(dir.path().join("sensor.bcsv")), &fixed_provenance())
        .unwrap();
    assert_eq!(summary.timeline.phases(), &[1.0, 2.0, 3.0]);
    assert_eq!(summary.views, 3);
}
