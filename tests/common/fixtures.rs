//! Reusable test content

/// Design dump with one token of each kind and one exportable slice
pub const DESIGN_DUMP: &str = r##"{
    "name": "poodle surf",
    "colors": [
        {"name": "ocean blue", "value": "#3ab4ff"},
        {"name": "sand", "value": "#f4e1c1"}
    ],
    "gradients": [
        {"name": "sky", "from": {"x": 0, "y": 0}, "to": {"x": 0, "y": 1},
         "stops": [{"position": 0, "color": "#ffffff"}, {"position": 1, "color": "#3ab4ff"}]}
    ],
    "typographs": [],
    "layers": [
        {"name": "Report", "class": "MSArtboardGroup", "exportable": true, "layers": [
            {"name": "pin", "class": "MSLayerGroup", "exportable": true, "width": 29.4, "height": 38, "layers": []}
        ]}
    ]
}"##;

/// Same design with the sand color changed
pub fn design_with_sand(value: &str) -> String {
    DESIGN_DUMP.replace("#f4e1c1", value)
}

/// Not a real image; the pipeline only copies bytes
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nswatch";
