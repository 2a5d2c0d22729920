quantity!(Hours, via: f64, suffix: "h", precision: 1);
positive!(Hours);
