#[macro_export]
macro_rules! boxentry {
    ( $key: expr, $value: expr) => {
        Box::new($crate::Entry {
            key: $key.into(),
            value: $value,
            next: None,
        })
    };
}

#[macro_export]
macro_rules! entry {
    ( $key: expr, $value: expr) => {
        $crate::Entry {
            key: $key.into(),
            value: $value,
            next: None,
        }
    };
}
