//! Helpers for pulling typed fields out of compound tags, turning missing
//! or mistyped fields into `InvalidData` errors.

use anvil_nbt::Tag;
use std::collections::HashMap;
use std::io;

pub(crate) fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

pub(crate) fn as_compound(tag: &Tag) -> io::Result<&HashMap<String, Tag>> {
    tag.as_compound()
        .ok_or_else(|| invalid_data("expected a compound tag".to_owned()))
}

fn field<'a>(compound: &'a HashMap<String, Tag>, name: &str) -> io::Result<&'a Tag> {
    compound
        .get(name)
        .ok_or_else(|| invalid_data(format!("missing {} tag", name)))
}

pub(crate) fn compound<'a>(
    parent: &'a HashMap<String, Tag>,
    name: &str,
) -> io::Result<&'a HashMap<String, Tag>> {
    field(parent, name)?
        .as_compound()
        .ok_or_else(|| invalid_data(format!("{} is not a compound tag", name)))
}

pub(crate) fn list<'a>(parent: &'a HashMap<String, Tag>, name: &str) -> io::Result<&'a Vec<Tag>> {
    field(parent, name)?
        .as_list()
        .ok_or_else(|| invalid_data(format!("{} is not a list tag", name)))
}

pub(crate) fn byte_array<'a>(parent: &'a HashMap<String, Tag>, name: &str) -> io::Result<&'a [u8]> {
    field(parent, name)?
        .as_byte_array()
        .ok_or_else(|| invalid_data(format!("{} is not a byte array tag", name)))
}

pub(crate) fn int_array<'a>(
    parent: &'a HashMap<String, Tag>,
    name: &str,
) -> io::Result<&'a [i32]> {
    field(parent, name)?
        .as_int_array()
        .ok_or_else(|| invalid_data(format!("{} is not an int array tag", name)))
}

pub(crate) fn int(parent: &HashMap<String, Tag>, name: &str) -> io::Result<i32> {
    field(parent, name)?
        .as_i32()
        .ok_or_else(|| invalid_data(format!("{} is not an int tag", name)))
}

pub(crate) fn byte(parent: &HashMap<String, Tag>, name: &str) -> io::Result<i8> {
    field(parent, name)?
        .as_i8()
        .ok_or_else(|| invalid_data(format!("{} is not a byte tag", name)))
}
