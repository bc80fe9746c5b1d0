//! Supertype table for the `IfcObjectDefinition` branch of the IFC schemas.
//!
//! Parentage follows IFC4. IFC4X3 moves the former `IfcBuildingElement`
//! subtypes under `IfcBuiltElement` and `IfcBuilding` under `IfcFacility`.

use crate::parser::schema::SchemaGeneration;

const SUPERTYPES: &[(&str, &str)] = &[
    ("IFCOBJECTDEFINITION", "IFCROOT"),
    ("IFCOBJECT", "IFCOBJECTDEFINITION"),
    ("IFCCONTEXT", "IFCOBJECTDEFINITION"),
    ("IFCTYPEOBJECT", "IFCOBJECTDEFINITION"),
    // Contexts
    ("IFCPROJECT", "IFCCONTEXT"),
    ("IFCPROJECTLIBRARY", "IFCCONTEXT"),
    // Objects
    ("IFCPRODUCT", "IFCOBJECT"),
    ("IFCPROCESS", "IFCOBJECT"),
    ("IFCTASK", "IFCPROCESS"),
    ("IFCRESOURCE", "IFCOBJECT"),
    ("IFCCONTROL", "IFCOBJECT"),
    ("IFCACTOR", "IFCOBJECT"),
    ("IFCGROUP", "IFCOBJECT"),
    ("IFCSYSTEM", "IFCGROUP"),
    ("IFCZONE", "IFCSYSTEM"),
    ("IFCBUILDINGSYSTEM", "IFCSYSTEM"),
    ("IFCDISTRIBUTIONSYSTEM", "IFCSYSTEM"),
    // Spatial structure
    ("IFCSPATIALELEMENT", "IFCPRODUCT"),
    ("IFCSPATIALSTRUCTUREELEMENT", "IFCSPATIALELEMENT"),
    ("IFCEXTERNALSPATIALELEMENT", "IFCSPATIALELEMENT"),
    ("IFCSPATIALZONE", "IFCSPATIALELEMENT"),
    ("IFCSITE", "IFCSPATIALSTRUCTUREELEMENT"),
    ("IFCBUILDING", "IFCSPATIALSTRUCTUREELEMENT"),
    ("IFCBUILDINGSTOREY", "IFCSPATIALSTRUCTUREELEMENT"),
    ("IFCSPACE", "IFCSPATIALSTRUCTUREELEMENT"),
    ("IFCFACILITY", "IFCSPATIALSTRUCTUREELEMENT"),
    ("IFCFACILITYPART", "IFCSPATIALSTRUCTUREELEMENT"),
    ("IFCBRIDGE", "IFCFACILITY"),
    ("IFCROAD", "IFCFACILITY"),
    ("IFCRAILWAY", "IFCFACILITY"),
    ("IFCMARINEFACILITY", "IFCFACILITY"),
    ("IFCTUNNEL", "IFCFACILITY"),
    ("IFCBRIDGEPART", "IFCFACILITYPART"),
    ("IFCROADPART", "IFCFACILITYPART"),
    ("IFCRAILWAYPART", "IFCFACILITYPART"),
    // Other products
    ("IFCANNOTATION", "IFCPRODUCT"),
    ("IFCGRID", "IFCPRODUCT"),
    ("IFCPROXY", "IFCPRODUCT"),
    ("IFCSTRUCTURALITEM", "IFCPRODUCT"),
    ("IFCPOSITIONINGELEMENT", "IFCPRODUCT"),
    ("IFCALIGNMENT", "IFCPOSITIONINGELEMENT"),
    ("IFCREFERENT", "IFCPOSITIONINGELEMENT"),
    // Elements
    ("IFCELEMENT", "IFCPRODUCT"),
    ("IFCBUILDINGELEMENT", "IFCELEMENT"),
    ("IFCBUILTELEMENT", "IFCELEMENT"),
    ("IFCCIVILELEMENT", "IFCELEMENT"),
    ("IFCGEOGRAPHICELEMENT", "IFCELEMENT"),
    ("IFCGEOTECHNICALELEMENT", "IFCELEMENT"),
    ("IFCTRANSPORTELEMENT", "IFCELEMENT"),
    ("IFCVIRTUALELEMENT", "IFCELEMENT"),
    ("IFCELEMENTASSEMBLY", "IFCELEMENT"),
    ("IFCELEMENTCOMPONENT", "IFCELEMENT"),
    ("IFCFURNISHINGELEMENT", "IFCELEMENT"),
    ("IFCFEATUREELEMENT", "IFCELEMENT"),
    ("IFCDISTRIBUTIONELEMENT", "IFCELEMENT"),
    // Building elements
    ("IFCWALL", "IFCBUILDINGELEMENT"),
    ("IFCWALLSTANDARDCASE", "IFCWALL"),
    ("IFCWALLELEMENTEDCASE", "IFCWALL"),
    ("IFCSLAB", "IFCBUILDINGELEMENT"),
    ("IFCSLABSTANDARDCASE", "IFCSLAB"),
    ("IFCSLABELEMENTEDCASE", "IFCSLAB"),
    ("IFCBEAM", "IFCBUILDINGELEMENT"),
    ("IFCBEAMSTANDARDCASE", "IFCBEAM"),
    ("IFCCOLUMN", "IFCBUILDINGELEMENT"),
    ("IFCCOLUMNSTANDARDCASE", "IFCCOLUMN"),
    ("IFCMEMBER", "IFCBUILDINGELEMENT"),
    ("IFCMEMBERSTANDARDCASE", "IFCMEMBER"),
    ("IFCPLATE", "IFCBUILDINGELEMENT"),
    ("IFCPLATESTANDARDCASE", "IFCPLATE"),
    ("IFCDOOR", "IFCBUILDINGELEMENT"),
    ("IFCDOORSTANDARDCASE", "IFCDOOR"),
    ("IFCWINDOW", "IFCBUILDINGELEMENT"),
    ("IFCWINDOWSTANDARDCASE", "IFCWINDOW"),
    ("IFCROOF", "IFCBUILDINGELEMENT"),
    ("IFCSTAIR", "IFCBUILDINGELEMENT"),
    ("IFCSTAIRFLIGHT", "IFCBUILDINGELEMENT"),
    ("IFCRAMP", "IFCBUILDINGELEMENT"),
    ("IFCRAMPFLIGHT", "IFCBUILDINGELEMENT"),
    ("IFCRAILING", "IFCBUILDINGELEMENT"),
    ("IFCCOVERING", "IFCBUILDINGELEMENT"),
    ("IFCCURTAINWALL", "IFCBUILDINGELEMENT"),
    ("IFCFOOTING", "IFCBUILDINGELEMENT"),
    ("IFCPILE", "IFCBUILDINGELEMENT"),
    ("IFCCHIMNEY", "IFCBUILDINGELEMENT"),
    ("IFCSHADINGDEVICE", "IFCBUILDINGELEMENT"),
    ("IFCBUILDINGELEMENTPROXY", "IFCBUILDINGELEMENT"),
    ("IFCBEARING", "IFCBUILDINGELEMENT"),
    ("IFCCOURSE", "IFCBUILDINGELEMENT"),
    ("IFCPAVEMENT", "IFCBUILDINGELEMENT"),
    ("IFCKERB", "IFCBUILDINGELEMENT"),
    ("IFCRAIL", "IFCBUILDINGELEMENT"),
    ("IFCTRACKELEMENT", "IFCBUILDINGELEMENT"),
    ("IFCEARTHWORKSELEMENT", "IFCBUILDINGELEMENT"),
    ("IFCDEEPFOUNDATION", "IFCBUILDINGELEMENT"),
    ("IFCCAISSONFOUNDATION", "IFCDEEPFOUNDATION"),
    // Components
    ("IFCBUILDINGELEMENTPART", "IFCELEMENTCOMPONENT"),
    ("IFCDISCRETEACCESSORY", "IFCELEMENTCOMPONENT"),
    ("IFCFASTENER", "IFCELEMENTCOMPONENT"),
    ("IFCMECHANICALFASTENER", "IFCELEMENTCOMPONENT"),
    ("IFCREINFORCINGELEMENT", "IFCELEMENTCOMPONENT"),
    ("IFCREINFORCINGBAR", "IFCREINFORCINGELEMENT"),
    ("IFCREINFORCINGMESH", "IFCREINFORCINGELEMENT"),
    ("IFCTENDON", "IFCREINFORCINGELEMENT"),
    ("IFCTENDONANCHOR", "IFCREINFORCINGELEMENT"),
    ("IFCVIBRATIONISOLATOR", "IFCELEMENTCOMPONENT"),
    ("IFCVIBRATIONDAMPER", "IFCELEMENTCOMPONENT"),
    ("IFCIMPACTPROTECTIONDEVICE", "IFCELEMENTCOMPONENT"),
    ("IFCSIGN", "IFCELEMENTCOMPONENT"),
    // Furnishing
    ("IFCFURNITURE", "IFCFURNISHINGELEMENT"),
    ("IFCSYSTEMFURNITUREELEMENT", "IFCFURNISHINGELEMENT"),
    // Features
    ("IFCFEATUREELEMENTSUBTRACTION", "IFCFEATUREELEMENT"),
    ("IFCFEATUREELEMENTADDITION", "IFCFEATUREELEMENT"),
    ("IFCOPENINGELEMENT", "IFCFEATUREELEMENTSUBTRACTION"),
    ("IFCOPENINGSTANDARDCASE", "IFCOPENINGELEMENT"),
    ("IFCVOIDINGFEATURE", "IFCFEATUREELEMENTSUBTRACTION"),
    ("IFCPROJECTIONELEMENT", "IFCFEATUREELEMENTADDITION"),
    ("IFCSURFACEFEATURE", "IFCFEATUREELEMENT"),
    // Distribution
    ("IFCDISTRIBUTIONFLOWELEMENT", "IFCDISTRIBUTIONELEMENT"),
    ("IFCDISTRIBUTIONCONTROLELEMENT", "IFCDISTRIBUTIONELEMENT"),
    ("IFCFLOWSEGMENT", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCFLOWFITTING", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCFLOWTERMINAL", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCFLOWCONTROLLER", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCFLOWMOVINGDEVICE", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCFLOWSTORAGEDEVICE", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCFLOWTREATMENTDEVICE", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCENERGYCONVERSIONDEVICE", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCPIPESEGMENT", "IFCFLOWSEGMENT"),
    ("IFCDUCTSEGMENT", "IFCFLOWSEGMENT"),
    ("IFCCABLESEGMENT", "IFCFLOWSEGMENT"),
    ("IFCPIPEFITTING", "IFCFLOWFITTING"),
    ("IFCDUCTFITTING", "IFCFLOWFITTING"),
    ("IFCSANITARYTERMINAL", "IFCFLOWTERMINAL"),
    ("IFCLIGHTFIXTURE", "IFCFLOWTERMINAL"),
    ("IFCAIRTERMINAL", "IFCFLOWTERMINAL"),
    ("IFCVALVE", "IFCFLOWCONTROLLER"),
    ("IFCPUMP", "IFCFLOWMOVINGDEVICE"),
    ("IFCFAN", "IFCFLOWMOVINGDEVICE"),
    ("IFCTANK", "IFCFLOWSTORAGEDEVICE"),
    ("IFCELECTRICFLOWSTORAGEDEVICE", "IFCFLOWSTORAGEDEVICE"),
    ("IFCCOMPRESSOR", "IFCFLOWMOVINGDEVICE"),
    ("IFCCABLECARRIERSEGMENT", "IFCFLOWSEGMENT"),
    ("IFCCABLEFITTING", "IFCFLOWFITTING"),
    ("IFCCABLECARRIERFITTING", "IFCFLOWFITTING"),
    ("IFCJUNCTIONBOX", "IFCFLOWFITTING"),
    ("IFCELECTRICAPPLIANCE", "IFCFLOWTERMINAL"),
    ("IFCOUTLET", "IFCFLOWTERMINAL"),
    ("IFCLAMP", "IFCFLOWTERMINAL"),
    ("IFCAUDIOVISUALAPPLIANCE", "IFCFLOWTERMINAL"),
    ("IFCCOMMUNICATIONSAPPLIANCE", "IFCFLOWTERMINAL"),
    ("IFCFIRESUPPRESSIONTERMINAL", "IFCFLOWTERMINAL"),
    ("IFCMEDICALDEVICE", "IFCFLOWTERMINAL"),
    ("IFCSPACEHEATER", "IFCFLOWTERMINAL"),
    ("IFCSTACKTERMINAL", "IFCFLOWTERMINAL"),
    ("IFCWASTETERMINAL", "IFCFLOWTERMINAL"),
    ("IFCSWITCHINGDEVICE", "IFCFLOWCONTROLLER"),
    ("IFCDAMPER", "IFCFLOWCONTROLLER"),
    ("IFCELECTRICDISTRIBUTIONBOARD", "IFCFLOWCONTROLLER"),
    ("IFCELECTRICTIMECONTROL", "IFCFLOWCONTROLLER"),
    ("IFCFLOWMETER", "IFCFLOWCONTROLLER"),
    ("IFCPROTECTIVEDEVICE", "IFCFLOWCONTROLLER"),
    ("IFCDUCTSILENCER", "IFCFLOWTREATMENTDEVICE"),
    ("IFCFILTER", "IFCFLOWTREATMENTDEVICE"),
    ("IFCINTERCEPTOR", "IFCFLOWTREATMENTDEVICE"),
    ("IFCBOILER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCBURNER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCCHILLER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCCOIL", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCCONDENSER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCCOOLEDBEAM", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCCOOLINGTOWER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCELECTRICGENERATOR", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCELECTRICMOTOR", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCENGINE", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCEVAPORATIVECOOLER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCEVAPORATOR", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCHEATEXCHANGER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCHUMIDIFIER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCMOTORCONNECTION", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCSOLARDEVICE", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCTRANSFORMER", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCUNITARYEQUIPMENT", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCAIRTOAIRHEATRECOVERY", "IFCENERGYCONVERSIONDEVICE"),
    ("IFCDISTRIBUTIONCHAMBERELEMENT", "IFCDISTRIBUTIONFLOWELEMENT"),
    ("IFCSENSOR", "IFCDISTRIBUTIONCONTROLELEMENT"),
    ("IFCACTUATOR", "IFCDISTRIBUTIONCONTROLELEMENT"),
    ("IFCALARM", "IFCDISTRIBUTIONCONTROLELEMENT"),
    ("IFCCONTROLLER", "IFCDISTRIBUTIONCONTROLELEMENT"),
    ("IFCFLOWINSTRUMENT", "IFCDISTRIBUTIONCONTROLELEMENT"),
    ("IFCUNITARYCONTROLELEMENT", "IFCDISTRIBUTIONCONTROLELEMENT"),
    ("IFCPROTECTIVEDEVICETRIPPINGUNIT", "IFCDISTRIBUTIONCONTROLELEMENT"),
    // Ports
    ("IFCPORT", "IFCPRODUCT"),
    ("IFCDISTRIBUTIONPORT", "IFCPORT"),
    // Structural analysis
    ("IFCSTRUCTURALACTIVITY", "IFCPRODUCT"),
    ("IFCSTRUCTURALMEMBER", "IFCSTRUCTURALITEM"),
    ("IFCSTRUCTURALCONNECTION", "IFCSTRUCTURALITEM"),
    ("IFCSTRUCTURALCURVEMEMBER", "IFCSTRUCTURALMEMBER"),
    ("IFCSTRUCTURALCURVEMEMBERVARYING", "IFCSTRUCTURALCURVEMEMBER"),
    ("IFCSTRUCTURALSURFACEMEMBER", "IFCSTRUCTURALMEMBER"),
    ("IFCSTRUCTURALSURFACEMEMBERVARYING", "IFCSTRUCTURALSURFACEMEMBER"),
    ("IFCSTRUCTURALPOINTCONNECTION", "IFCSTRUCTURALCONNECTION"),
    ("IFCSTRUCTURALCURVECONNECTION", "IFCSTRUCTURALCONNECTION"),
    ("IFCSTRUCTURALSURFACECONNECTION", "IFCSTRUCTURALCONNECTION"),
    // Type objects
    ("IFCTYPEPROCESS", "IFCTYPEOBJECT"),
    ("IFCTYPERESOURCE", "IFCTYPEOBJECT"),
    ("IFCTYPEPRODUCT", "IFCTYPEOBJECT"),
    ("IFCELEMENTTYPE", "IFCTYPEPRODUCT"),
    ("IFCDOORSTYLE", "IFCTYPEPRODUCT"),
    ("IFCWINDOWSTYLE", "IFCTYPEPRODUCT"),
    ("IFCBUILDINGELEMENTTYPE", "IFCELEMENTTYPE"),
    ("IFCBUILTELEMENTTYPE", "IFCELEMENTTYPE"),
    ("IFCFURNISHINGELEMENTTYPE", "IFCELEMENTTYPE"),
    ("IFCDISTRIBUTIONELEMENTTYPE", "IFCELEMENTTYPE"),
    ("IFCFURNITURETYPE", "IFCFURNISHINGELEMENTTYPE"),
    ("IFCWALLTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCSLABTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCBEAMTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCCOLUMNTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCMEMBERTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCPLATETYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCDOORTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCWINDOWTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCROOFTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCSTAIRTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCSTAIRFLIGHTTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCRAMPTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCRAILINGTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCCOVERINGTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCCURTAINWALLTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCFOOTINGTYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCPILETYPE", "IFCBUILDINGELEMENTTYPE"),
    ("IFCBUILDINGELEMENTPROXYTYPE", "IFCBUILDINGELEMENTTYPE"),
];

/// Parent changes introduced by IFC4X3, checked before [`SUPERTYPES`].
const IFC4X3_SUPERTYPES: &[(&str, &str)] = &[
    ("IFCBUILDING", "IFCFACILITY"),
    ("IFCBUILDINGELEMENTTYPE", "IFCBUILTELEMENTTYPE"),
];

fn lookup(table: &'static [(&'static str, &'static str)], entity: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == entity)
        .map(|(_, parent)| *parent)
}

/// Direct supertype of an upper-case entity name.
#[must_use]
pub fn supertype(entity: &str, generation: SchemaGeneration) -> Option<&'static str> {
    if generation == SchemaGeneration::Ifc4x3 {
        if let Some(parent) = lookup(IFC4X3_SUPERTYPES, entity) {
            return Some(parent);
        }
        let parent = lookup(SUPERTYPES, entity)?;
        if parent == "IFCBUILDINGELEMENT" {
            return Some("IFCBUILTELEMENT");
        }
        return Some(parent);
    }
    lookup(SUPERTYPES, entity)
}

/// Whether the table knows where `entity` sits in the hierarchy.
#[must_use]
pub fn is_known(entity: &str, generation: SchemaGeneration) -> bool {
    supertype(entity, generation).is_some()
}

/// Whether `entity` equals `ancestor` or derives from it. Both names upper-case.
#[must_use]
pub fn is_subtype_of(entity: &str, ancestor: &str, generation: SchemaGeneration) -> bool {
    let mut current = Some(entity);
    while let Some(name) = current {
        if name == ancestor {
            return true;
        }
        current = supertype(name, generation);
    }
    false
}
