//! Named Binary Tag reading and writing.
//!
//! Implements the classic NBT wire format (type codes 0 through 11,
//! big-endian scalars, UTF-8 names) used by Minecraft level and region
//! files. Tags form trees through lists and compounds; a whole stream can
//! optionally be gzip-framed via [`NbtFile`].

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashMap;
use std::io::{self, Read, Write};

/// The type code of a tag, as stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagType {
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
}

impl TagType {
    pub fn id(self) -> u8 {
        match self {
            TagType::End => 0,
            TagType::Byte => 1,
            TagType::Short => 2,
            TagType::Int => 3,
            TagType::Long => 4,
            TagType::Float => 5,
            TagType::Double => 6,
            TagType::ByteArray => 7,
            TagType::String => 8,
            TagType::List => 9,
            TagType::Compound => 10,
            TagType::IntArray => 11,
        }
    }

    pub fn from_id(id: u8) -> Option<TagType> {
        match id {
            0 => Some(TagType::End),
            1 => Some(TagType::Byte),
            2 => Some(TagType::Short),
            3 => Some(TagType::Int),
            4 => Some(TagType::Long),
            5 => Some(TagType::Float),
            6 => Some(TagType::Double),
            7 => Some(TagType::ByteArray),
            8 => Some(TagType::String),
            9 => Some(TagType::List),
            10 => Some(TagType::Compound),
            11 => Some(TagType::IntArray),
            _ => None,
        }
    }
}

/// One NBT value. Lists carry their declared element type so that empty
/// lists round-trip the element type byte they were written with.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(TagType, Vec<Tag>),
    Compound(HashMap<String, Tag>),
    IntArray(Vec<i32>),
}

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

impl Tag {
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::End => TagType::End,
            Tag::Byte(_) => TagType::Byte,
            Tag::Short(_) => TagType::Short,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::String(_) => TagType::String,
            Tag::List(_, _) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
            Tag::IntArray(_) => TagType::IntArray,
        }
    }

    pub fn type_id(&self) -> u8 {
        self.tag_type().id()
    }

    /// Reads one named tag from the stream. An End tag is not a legal
    /// top-level value; it may only terminate a compound.
    pub fn read<R: Read>(reader: &mut R) -> io::Result<(String, Tag)> {
        Self::read_named(reader, 0)
    }

    fn read_named<R: Read>(reader: &mut R, depth: u32) -> io::Result<(String, Tag)> {
        let type_id = reader.read_u8()?;
        let tag_type = TagType::from_id(type_id)
            .ok_or_else(|| invalid_data(format!("Invalid tag type: {}", type_id)))?;

        if tag_type == TagType::End {
            if depth == 0 {
                return Err(invalid_data(
                    "End tag without enclosing container".to_owned(),
                ));
            }
            return Ok((String::new(), Tag::End));
        }

        let name_length = reader.read_u16::<BigEndian>()?;
        let mut name_bytes = vec![0u8; name_length as usize];
        reader.read_exact(&mut name_bytes)?;
        let name = String::from_utf8(name_bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tag = Tag::read_payload(reader, tag_type, depth)?;
        Ok((name, tag))
    }

    fn read_payload<R: Read>(reader: &mut R, tag_type: TagType, depth: u32) -> io::Result<Tag> {
        match tag_type {
            TagType::End => Ok(Tag::End),
            TagType::Byte => Ok(Tag::Byte(reader.read_i8()?)),
            TagType::Short => Ok(Tag::Short(reader.read_i16::<BigEndian>()?)),
            TagType::Int => Ok(Tag::Int(reader.read_i32::<BigEndian>()?)),
            TagType::Long => Ok(Tag::Long(reader.read_i64::<BigEndian>()?)),
            TagType::Float => Ok(Tag::Float(reader.read_f32::<BigEndian>()?)),
            TagType::Double => Ok(Tag::Double(reader.read_f64::<BigEndian>()?)),
            TagType::ByteArray => {
                let length = read_length(reader)?;
                let mut bytes = vec![0u8; length];
                reader.read_exact(&mut bytes)?;
                Ok(Tag::ByteArray(bytes))
            }
            TagType::String => {
                let length = reader.read_u16::<BigEndian>()?;
                let mut bytes = vec![0u8; length as usize];
                reader.read_exact(&mut bytes)?;
                String::from_utf8(bytes)
                    .map(Tag::String)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            TagType::List => {
                let element_id = reader.read_u8()?;
                let element_type = TagType::from_id(element_id)
                    .ok_or_else(|| invalid_data(format!("Invalid tag type: {}", element_id)))?;
                let length = read_length(reader)?;
                let mut list = Vec::with_capacity(length.min(1024));
                for _ in 0..length {
                    if element_type == TagType::End {
                        return Err(invalid_data("End not permitted in list".to_owned()));
                    }
                    list.push(Tag::read_payload(reader, element_type, depth + 1)?);
                }
                Ok(Tag::List(element_type, list))
            }
            TagType::Compound => {
                let mut compound = HashMap::new();
                loop {
                    let (name, tag) = Tag::read_named(reader, depth + 1)?;
                    if let Tag::End = tag {
                        break;
                    }
                    // Duplicate names: last write wins.
                    compound.insert(name, tag);
                }
                Ok(Tag::Compound(compound))
            }
            TagType::IntArray => {
                let length = read_length(reader)?;
                let mut ints = Vec::with_capacity(length.min(1024));
                for _ in 0..length {
                    ints.push(reader.read_i32::<BigEndian>()?);
                }
                Ok(Tag::IntArray(ints))
            }
        }
    }

    /// Writes this tag with the given name. Writing a named End tag is an
    /// encode error; an End tag with an empty name emits the single
    /// terminator byte used to close compounds.
    pub fn write<W: Write>(&self, writer: &mut W, name: &str) -> io::Result<()> {
        if let Tag::End = self {
            if !name.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "Named End tag not permitted",
                ));
            }
            return writer.write_u8(0);
        }

        writer.write_u8(self.type_id())?;
        writer.write_u16::<BigEndian>(name.len() as u16)?;
        writer.write_all(name.as_bytes())?;

        self.write_payload(writer)
    }

    fn write_payload<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Tag::End => Ok(()),
            Tag::Byte(v) => writer.write_i8(*v),
            Tag::Short(v) => writer.write_i16::<BigEndian>(*v),
            Tag::Int(v) => writer.write_i32::<BigEndian>(*v),
            Tag::Long(v) => writer.write_i64::<BigEndian>(*v),
            Tag::Float(v) => writer.write_f32::<BigEndian>(*v),
            Tag::Double(v) => writer.write_f64::<BigEndian>(*v),
            Tag::ByteArray(v) => {
                writer.write_i32::<BigEndian>(v.len() as i32)?;
                writer.write_all(v)
            }
            Tag::String(v) => {
                writer.write_u16::<BigEndian>(v.len() as u16)?;
                writer.write_all(v.as_bytes())
            }
            Tag::List(element_type, v) => {
                writer.write_u8(element_type.id())?;
                writer.write_i32::<BigEndian>(v.len() as i32)?;
                for tag in v {
                    if tag.tag_type() != *element_type {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!(
                                "List element type mismatch: declared {}, found {}",
                                element_type.id(),
                                tag.type_id()
                            ),
                        ));
                    }
                    tag.write_payload(writer)?;
                }
                Ok(())
            }
            Tag::Compound(v) => {
                for (name, tag) in v {
                    tag.write(writer, name)?;
                }
                // Compound terminator
                writer.write_u8(0)
            }
            Tag::IntArray(v) => {
                writer.write_i32::<BigEndian>(v.len() as i32)?;
                for &i in v {
                    writer.write_i32::<BigEndian>(i)?;
                }
                Ok(())
            }
        }
    }

    pub fn as_compound(&self) -> Option<&HashMap<String, Tag>> {
        match self {
            Tag::Compound(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Tag>> {
        match self {
            Tag::List(_, list) => Some(list),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            Tag::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Tag::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Tag::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Tag::Short(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Tag::Byte(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Tag::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Tag::Float(n) => Some(*n),
            _ => None,
        }
    }
}

fn read_length<R: Read>(reader: &mut R) -> io::Result<usize> {
    let length = reader.read_i32::<BigEndian>()?;
    if length < 0 {
        return Err(invalid_data(format!("Negative length: {}", length)));
    }
    Ok(length as usize)
}

/// A complete NBT stream: one named root tag, optionally gzip-framed.
pub struct NbtFile {
    pub root: Tag,
    pub name: String,
}

impl NbtFile {
    pub fn new(name: String, root: Tag) -> Self {
        NbtFile { root, name }
    }

    pub fn read<R: Read>(reader: &mut R) -> io::Result<Self> {
        let (name, root) = Tag::read(reader)?;
        Ok(NbtFile { root, name })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.root.write(writer, &self.name)
    }

    pub fn read_gzip<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut decoder = GzDecoder::new(reader);
        Self::read(&mut decoder)
    }

    pub fn write_gzip<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        self.write(&mut encoder)?;
        encoder.finish()?;
        Ok(())
    }
}
