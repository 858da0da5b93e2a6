//! Operation name to opcode mapping.
//!
//! Codes at or below 0xFF are single-byte opcodes. Larger codes pack a
//! prefix in the high byte (0xFC bulk memory / saturating truncation,
//! 0xFD fixed-width SIMD, 0xFE threads/atomics) and the sub-code in the
//! low byte; the writer emits the prefix raw and the sub-code as an
//! unsigned LEB128 integer.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Every encodable operation name and its code, grouped as in the
/// binary format's opcode space.
pub const OPCODES: &[(&str, u32)] = &[
    // Control.
    ("unreachable", 0x00),
    ("nop", 0x01),
    ("block", 0x02),
    ("loop", 0x03),
    ("if", 0x04),
    ("else", 0x05),
    ("end", 0x0B),
    ("br", 0x0C),
    ("br_if", 0x0D),
    ("br_table", 0x0E),
    ("return", 0x0F),
    ("call", 0x10),
    ("call_indirect", 0x11),
    // Parametric.
    ("drop", 0x1A),
    ("select", 0x1B),
    // Variables.
    ("local.get", 0x20),
    ("local.set", 0x21),
    ("local.tee", 0x22),
    ("global.get", 0x23),
    ("global.set", 0x24),
    // Memory.
    ("i32.load", 0x28),
    ("i64.load", 0x29),
    ("f32.load", 0x2A),
    ("f64.load", 0x2B),
    ("i32.load8_s", 0x2C),
    ("i32.load8_u", 0x2D),
    ("i32.load16_s", 0x2E),
    ("i32.load16_u", 0x2F),
    ("i64.load8_s", 0x30),
    ("i64.load8_u", 0x31),
    ("i64.load16_s", 0x32),
    ("i64.load16_u", 0x33),
    ("i64.load32_s", 0x34),
    ("i64.load32_u", 0x35),
    ("i32.store", 0x36),
    ("i64.store", 0x37),
    ("f32.store", 0x38),
    ("f64.store", 0x39),
    ("i32.store8", 0x3A),
    ("i32.store16", 0x3B),
    ("i64.store8", 0x3C),
    ("i64.store16", 0x3D),
    ("i64.store32", 0x3E),
    ("memory.size", 0x3F),
    ("memory.grow", 0x40),
    // Constants.
    ("i32.const", 0x41),
    ("i64.const", 0x42),
    ("f32.const", 0x43),
    ("f64.const", 0x44),
    // i32 comparison.
    ("i32.eqz", 0x45),
    ("i32.eq", 0x46),
    ("i32.ne", 0x47),
    ("i32.lt_s", 0x48),
    ("i32.lt_u", 0x49),
    ("i32.gt_s", 0x4A),
    ("i32.gt_u", 0x4B),
    ("i32.le_s", 0x4C),
    ("i32.le_u", 0x4D),
    ("i32.ge_s", 0x4E),
    ("i32.ge_u", 0x4F),
    // i64 comparison.
    ("i64.eqz", 0x50),
    ("i64.eq", 0x51),
    ("i64.ne", 0x52),
    ("i64.lt_s", 0x53),
    ("i64.lt_u", 0x54),
    ("i64.gt_s", 0x55),
    ("i64.gt_u", 0x56),
    ("i64.le_s", 0x57),
    ("i64.le_u", 0x58),
    ("i64.ge_s", 0x59),
    ("i64.ge_u", 0x5A),
    // f32 comparison.
    ("f32.eq", 0x5B),
    ("f32.ne", 0x5C),
    ("f32.lt", 0x5D),
    ("f32.gt", 0x5E),
    ("f32.le", 0x5F),
    ("f32.ge", 0x60),
    // f64 comparison.
    ("f64.eq", 0x61),
    ("f64.ne", 0x62),
    ("f64.lt", 0x63),
    ("f64.gt", 0x64),
    ("f64.le", 0x65),
    ("f64.ge", 0x66),
    // i32 arithmetic.
    ("i32.clz", 0x67),
    ("i32.ctz", 0x68),
    ("i32.popcnt", 0x69),
    ("i32.add", 0x6A),
    ("i32.sub", 0x6B),
    ("i32.mul", 0x6C),
    ("i32.div_s", 0x6D),
    ("i32.div_u", 0x6E),
    ("i32.rem_s", 0x6F),
    ("i32.rem_u", 0x70),
    ("i32.and", 0x71),
    ("i32.or", 0x72),
    ("i32.xor", 0x73),
    ("i32.shl", 0x74),
    ("i32.shr_s", 0x75),
    ("i32.shr_u", 0x76),
    ("i32.rotl", 0x77),
    ("i32.rotr", 0x78),
    // i64 arithmetic.
    ("i64.clz", 0x79),
    ("i64.ctz", 0x7A),
    ("i64.popcnt", 0x7B),
    ("i64.add", 0x7C),
    ("i64.sub", 0x7D),
    ("i64.mul", 0x7E),
    ("i64.div_s", 0x7F),
    ("i64.div_u", 0x80),
    ("i64.rem_s", 0x81),
    ("i64.rem_u", 0x82),
    ("i64.and", 0x83),
    ("i64.or", 0x84),
    ("i64.xor", 0x85),
    ("i64.shl", 0x86),
    ("i64.shr_s", 0x87),
    ("i64.shr_u", 0x88),
    ("i64.rotl", 0x89),
    ("i64.rotr", 0x8A),
    // f32 arithmetic.
    ("f32.abs", 0x8B),
    ("f32.neg", 0x8C),
    ("f32.ceil", 0x8D),
    ("f32.floor", 0x8E),
    ("f32.trunc", 0x8F),
    ("f32.nearest", 0x90),
    ("f32.sqrt", 0x91),
    ("f32.add", 0x92),
    ("f32.sub", 0x93),
    ("f32.mul", 0x94),
    ("f32.div", 0x95),
    ("f32.min", 0x96),
    ("f32.max", 0x97),
    ("f32.copysign", 0x98),
    // f64 arithmetic.
    ("f64.abs", 0x99),
    ("f64.neg", 0x9A),
    ("f64.ceil", 0x9B),
    ("f64.floor", 0x9C),
    ("f64.trunc", 0x9D),
    ("f64.nearest", 0x9E),
    ("f64.sqrt", 0x9F),
    ("f64.add", 0xA0),
    ("f64.sub", 0xA1),
    ("f64.mul", 0xA2),
    ("f64.div", 0xA3),
    ("f64.min", 0xA4),
    ("f64.max", 0xA5),
    ("f64.copysign", 0xA6),
    // Conversions.
    ("i32.wrap_i64", 0xA7),
    ("i32.trunc_f32_s", 0xA8),
    ("i32.trunc_f32_u", 0xA9),
    ("i32.trunc_f64_s", 0xAA),
    ("i32.trunc_f64_u", 0xAB),
    ("i64.extend_i32_s", 0xAC),
    ("i64.extend_i32_u", 0xAD),
    ("i64.trunc_f32_s", 0xAE),
    ("i64.trunc_f32_u", 0xAF),
    ("i64.trunc_f64_s", 0xB0),
    ("i64.trunc_f64_u", 0xB1),
    ("f32.convert_i32_s", 0xB2),
    ("f32.convert_i32_u", 0xB3),
    ("f32.convert_i64_s", 0xB4),
    ("f32.convert_i64_u", 0xB5),
    ("f32.demote_f64", 0xB6),
    ("f64.convert_i32_s", 0xB7),
    ("f64.convert_i32_u", 0xB8),
    ("f64.convert_i64_s", 0xB9),
    ("f64.convert_i64_u", 0xBA),
    ("f64.promote_f32", 0xBB),
    ("i32.reinterpret_f32", 0xBC),
    ("i64.reinterpret_f64", 0xBD),
    ("f32.reinterpret_i32", 0xBE),
    ("f64.reinterpret_i64", 0xBF),
    // Sign extension.
    ("i32.extend8_s", 0xC0),
    ("i32.extend16_s", 0xC1),
    ("i64.extend8_s", 0xC2),
    ("i64.extend16_s", 0xC3),
    ("i64.extend32_s", 0xC4),
    // Saturating truncation (0xFC prefix).
    ("i32.trunc_sat_f32_s", 0xFC00),
    ("i32.trunc_sat_f32_u", 0xFC01),
    ("i32.trunc_sat_f64_s", 0xFC02),
    ("i32.trunc_sat_f64_u", 0xFC03),
    ("i64.trunc_sat_f32_s", 0xFC04),
    ("i64.trunc_sat_f32_u", 0xFC05),
    ("i64.trunc_sat_f64_s", 0xFC06),
    ("i64.trunc_sat_f64_u", 0xFC07),
    // Bulk memory (0xFC prefix).
    ("memory.init", 0xFC08),
    ("data.drop", 0xFC09),
    ("memory.copy", 0xFC0A),
    ("memory.fill", 0xFC0B),
    ("table.init", 0xFC0C),
    ("elem.drop", 0xFC0D),
    ("table.copy", 0xFC0E),
    ("table.grow", 0xFC0F),
    ("table.size", 0xFC10),
    ("table.fill", 0xFC11),
    // SIMD memory and lane loads (0xFD prefix).
    ("v128.load", 0xFD00),
    ("v128.load8x8_s", 0xFD01),
    ("v128.load8x8_u", 0xFD02),
    ("v128.load16x4_s", 0xFD03),
    ("v128.load16x4_u", 0xFD04),
    ("v128.load32x2_s", 0xFD05),
    ("v128.load32x2_u", 0xFD06),
    ("v128.load8_splat", 0xFD07),
    ("v128.load16_splat", 0xFD08),
    ("v128.load32_splat", 0xFD09),
    ("v128.load64_splat", 0xFD0A),
    ("v128.store", 0xFD0B),
    ("v128.const", 0xFD0C),
    ("i8x16.shuffle", 0xFD0D),
    ("i8x16.swizzle", 0xFD0E),
    // Splats.
    ("i8x16.splat", 0xFD0F),
    ("i16x8.splat", 0xFD10),
    ("i32x4.splat", 0xFD11),
    ("i64x2.splat", 0xFD12),
    ("f32x4.splat", 0xFD13),
    ("f64x2.splat", 0xFD14),
    // Lane access.
    ("i8x16.extract_lane_s", 0xFD15),
    ("i8x16.extract_lane_u", 0xFD16),
    ("i8x16.replace_lane", 0xFD17),
    ("i16x8.extract_lane_s", 0xFD18),
    ("i16x8.extract_lane_u", 0xFD19),
    ("i16x8.replace_lane", 0xFD1A),
    ("i32x4.extract_lane", 0xFD1B),
    ("i32x4.replace_lane", 0xFD1C),
    ("i64x2.extract_lane", 0xFD1D),
    ("i64x2.replace_lane", 0xFD1E),
    ("f32x4.extract_lane", 0xFD1F),
    ("f32x4.replace_lane", 0xFD20),
    ("f64x2.extract_lane", 0xFD21),
    ("f64x2.replace_lane", 0xFD22),
    // SIMD comparison.
    ("i8x16.eq", 0xFD23),
    ("i8x16.ne", 0xFD24),
    ("i8x16.lt_s", 0xFD25),
    ("i8x16.lt_u", 0xFD26),
    ("i8x16.gt_s", 0xFD27),
    ("i8x16.gt_u", 0xFD28),
    ("i8x16.le_s", 0xFD29),
    ("i8x16.le_u", 0xFD2A),
    ("i8x16.ge_s", 0xFD2B),
    ("i8x16.ge_u", 0xFD2C),
    ("i16x8.eq", 0xFD2D),
    ("i16x8.ne", 0xFD2E),
    ("i16x8.lt_s", 0xFD2F),
    ("i16x8.lt_u", 0xFD30),
    ("i16x8.gt_s", 0xFD31),
    ("i16x8.gt_u", 0xFD32),
    ("i16x8.le_s", 0xFD33),
    ("i16x8.le_u", 0xFD34),
    ("i16x8.ge_s", 0xFD35),
    ("i16x8.ge_u", 0xFD36),
    ("i32x4.eq", 0xFD37),
    ("i32x4.ne", 0xFD38),
    ("i32x4.lt_s", 0xFD39),
    ("i32x4.lt_u", 0xFD3A),
    ("i32x4.gt_s", 0xFD3B),
    ("i32x4.gt_u", 0xFD3C),
    ("i32x4.le_s", 0xFD3D),
    ("i32x4.le_u", 0xFD3E),
    ("i32x4.ge_s", 0xFD3F),
    ("i32x4.ge_u", 0xFD40),
    ("f32x4.eq", 0xFD41),
    ("f32x4.ne", 0xFD42),
    ("f32x4.lt", 0xFD43),
    ("f32x4.gt", 0xFD44),
    ("f32x4.le", 0xFD45),
    ("f32x4.ge", 0xFD46),
    ("f64x2.eq", 0xFD47),
    ("f64x2.ne", 0xFD48),
    ("f64x2.lt", 0xFD49),
    ("f64x2.gt", 0xFD4A),
    ("f64x2.le", 0xFD4B),
    ("f64x2.ge", 0xFD4C),
    // Bitwise.
    ("v128.not", 0xFD4D),
    ("v128.and", 0xFD4E),
    ("v128.andnot", 0xFD4F),
    ("v128.or", 0xFD50),
    ("v128.xor", 0xFD51),
    ("v128.bitselect", 0xFD52),
    ("v128.any_true", 0xFD53),
    // Lane memory access.
    ("v128.load8_lane", 0xFD54),
    ("v128.load16_lane", 0xFD55),
    ("v128.load32_lane", 0xFD56),
    ("v128.load64_lane", 0xFD57),
    ("v128.store8_lane", 0xFD58),
    ("v128.store16_lane", 0xFD59),
    ("v128.store32_lane", 0xFD5A),
    ("v128.store64_lane", 0xFD5B),
    ("v128.load32_zero", 0xFD5C),
    ("v128.load64_zero", 0xFD5D),
    ("f32x4.demote_f64x2_zero", 0xFD5E),
    ("f64x2.promote_low_f32x4", 0xFD5F),
    // i8x16 arithmetic.
    ("i8x16.abs", 0xFD60),
    ("i8x16.neg", 0xFD61),
    ("i8x16.popcnt", 0xFD62),
    ("i8x16.all_true", 0xFD63),
    ("i8x16.bitmask", 0xFD64),
    ("i8x16.narrow_i16x8_s", 0xFD65),
    ("i8x16.narrow_i16x8_u", 0xFD66),
    ("f32x4.ceil", 0xFD67),
    ("f32x4.floor", 0xFD68),
    ("f32x4.trunc", 0xFD69),
    ("f32x4.nearest", 0xFD6A),
    ("i8x16.shl", 0xFD6B),
    ("i8x16.shr_s", 0xFD6C),
    ("i8x16.shr_u", 0xFD6D),
    ("i8x16.add", 0xFD6E),
    ("i8x16.add_sat_s", 0xFD6F),
    ("i8x16.add_sat_u", 0xFD70),
    ("i8x16.sub", 0xFD71),
    ("i8x16.sub_sat_s", 0xFD72),
    ("i8x16.sub_sat_u", 0xFD73),
    ("f64x2.ceil", 0xFD74),
    ("f64x2.floor", 0xFD75),
    ("i8x16.min_s", 0xFD76),
    ("i8x16.min_u", 0xFD77),
    ("i8x16.max_s", 0xFD78),
    ("i8x16.max_u", 0xFD79),
    ("f64x2.trunc", 0xFD7A),
    ("i8x16.avgr_u", 0xFD7B),
    ("i16x8.extadd_pairwise_i8x16_s", 0xFD7C),
    ("i16x8.extadd_pairwise_i8x16_u", 0xFD7D),
    ("i32x4.extadd_pairwise_i16x8_s", 0xFD7E),
    ("i32x4.extadd_pairwise_i16x8_u", 0xFD7F),
    // i16x8 arithmetic.
    ("i16x8.abs", 0xFD80),
    ("i16x8.neg", 0xFD81),
    ("i16x8.q15mulr_sat_s", 0xFD82),
    ("i16x8.all_true", 0xFD83),
    ("i16x8.bitmask", 0xFD84),
    ("i16x8.narrow_i32x4_s", 0xFD85),
    ("i16x8.narrow_i32x4_u", 0xFD86),
    ("i16x8.extend_low_i8x16_s", 0xFD87),
    ("i16x8.extend_high_i8x16_s", 0xFD88),
    ("i16x8.extend_low_i8x16_u", 0xFD89),
    ("i16x8.extend_high_i8x16_u", 0xFD8A),
    ("i16x8.shl", 0xFD8B),
    ("i16x8.shr_s", 0xFD8C),
    ("i16x8.shr_u", 0xFD8D),
    ("i16x8.add", 0xFD8E),
    ("i16x8.add_sat_s", 0xFD8F),
    ("i16x8.add_sat_u", 0xFD90),
    ("i16x8.sub", 0xFD91),
    ("i16x8.sub_sat_s", 0xFD92),
    ("i16x8.sub_sat_u", 0xFD93),
    ("f64x2.nearest", 0xFD94),
    ("i16x8.mul", 0xFD95),
    ("i16x8.min_s", 0xFD96),
    ("i16x8.min_u", 0xFD97),
    ("i16x8.max_s", 0xFD98),
    ("i16x8.max_u", 0xFD99),
    ("i16x8.avgr_u", 0xFD9B),
    ("i16x8.extmul_low_i8x16_s", 0xFD9C),
    ("i16x8.extmul_high_i8x16_s", 0xFD9D),
    ("i16x8.extmul_low_i8x16_u", 0xFD9E),
    ("i16x8.extmul_high_i8x16_u", 0xFD9F),
    // i32x4 arithmetic.
    ("i32x4.abs", 0xFDA0),
    ("i32x4.neg", 0xFDA1),
    ("i32x4.all_true", 0xFDA3),
    ("i32x4.bitmask", 0xFDA4),
    ("i32x4.extend_low_i16x8_s", 0xFDA7),
    ("i32x4.extend_high_i16x8_s", 0xFDA8),
    ("i32x4.extend_low_i16x8_u", 0xFDA9),
    ("i32x4.extend_high_i16x8_u", 0xFDAA),
    ("i32x4.shl", 0xFDAB),
    ("i32x4.shr_s", 0xFDAC),
    ("i32x4.shr_u", 0xFDAD),
    ("i32x4.add", 0xFDAE),
    ("i32x4.sub", 0xFDB1),
    ("i32x4.mul", 0xFDB5),
    ("i32x4.min_s", 0xFDB6),
    ("i32x4.min_u", 0xFDB7),
    ("i32x4.max_s", 0xFDB8),
    ("i32x4.max_u", 0xFDB9),
    ("i32x4.dot_i16x8_s", 0xFDBA),
    ("i32x4.extmul_low_i16x8_s", 0xFDBC),
    ("i32x4.extmul_high_i16x8_s", 0xFDBD),
    ("i32x4.extmul_low_i16x8_u", 0xFDBE),
    ("i32x4.extmul_high_i16x8_u", 0xFDBF),
    // i64x2 arithmetic.
    ("i64x2.abs", 0xFDC0),
    ("i64x2.neg", 0xFDC1),
    ("i64x2.all_true", 0xFDC3),
    ("i64x2.bitmask", 0xFDC4),
    ("i64x2.extend_low_i32x4_s", 0xFDC7),
    ("i64x2.extend_high_i32x4_s", 0xFDC8),
    ("i64x2.extend_low_i32x4_u", 0xFDC9),
    ("i64x2.extend_high_i32x4_u", 0xFDCA),
    ("i64x2.shl", 0xFDCB),
    ("i64x2.shr_s", 0xFDCC),
    ("i64x2.shr_u", 0xFDCD),
    ("i64x2.add", 0xFDCE),
    ("i64x2.sub", 0xFDD1),
    ("i64x2.mul", 0xFDD5),
    ("i64x2.eq", 0xFDD6),
    ("i64x2.ne", 0xFDD7),
    ("i64x2.lt_s", 0xFDD8),
    ("i64x2.gt_s", 0xFDD9),
    ("i64x2.le_s", 0xFDDA),
    ("i64x2.ge_s", 0xFDDB),
    ("i64x2.extmul_low_i32x4_s", 0xFDDC),
    ("i64x2.extmul_high_i32x4_s", 0xFDDD),
    ("i64x2.extmul_low_i32x4_u", 0xFDDE),
    ("i64x2.extmul_high_i32x4_u", 0xFDDF),
    // f32x4 arithmetic.
    ("f32x4.abs", 0xFDE0),
    ("f32x4.neg", 0xFDE1),
    ("f32x4.sqrt", 0xFDE3),
    ("f32x4.add", 0xFDE4),
    ("f32x4.sub", 0xFDE5),
    ("f32x4.mul", 0xFDE6),
    ("f32x4.div", 0xFDE7),
    ("f32x4.min", 0xFDE8),
    ("f32x4.max", 0xFDE9),
    ("f32x4.pmin", 0xFDEA),
    ("f32x4.pmax", 0xFDEB),
    // f64x2 arithmetic.
    ("f64x2.abs", 0xFDEC),
    ("f64x2.neg", 0xFDED),
    ("f64x2.sqrt", 0xFDEF),
    ("f64x2.add", 0xFDF0),
    ("f64x2.sub", 0xFDF1),
    ("f64x2.mul", 0xFDF2),
    ("f64x2.div", 0xFDF3),
    ("f64x2.min", 0xFDF4),
    ("f64x2.max", 0xFDF5),
    ("f64x2.pmin", 0xFDF6),
    ("f64x2.pmax", 0xFDF7),
    // SIMD conversions.
    ("i32x4.trunc_sat_f32x4_s", 0xFDF8),
    ("i32x4.trunc_sat_f32x4_u", 0xFDF9),
    ("f32x4.convert_i32x4_s", 0xFDFA),
    ("f32x4.convert_i32x4_u", 0xFDFB),
    ("i32x4.trunc_sat_f64x2_s_zero", 0xFDFC),
    ("i32x4.trunc_sat_f64x2_u_zero", 0xFDFD),
    ("f64x2.convert_low_i32x4_s", 0xFDFE),
    ("f64x2.convert_low_i32x4_u", 0xFDFF),
    // Atomics (0xFE prefix).
    ("memory.atomic.notify", 0xFE00),
    ("memory.atomic.wait32", 0xFE01),
    ("memory.atomic.wait64", 0xFE02),
    ("atomic.fence", 0xFE03),
    ("i32.atomic.load", 0xFE10),
    ("i64.atomic.load", 0xFE11),
    ("i32.atomic.load8_u", 0xFE12),
    ("i32.atomic.load16_u", 0xFE13),
    ("i64.atomic.load8_u", 0xFE14),
    ("i64.atomic.load16_u", 0xFE15),
    ("i64.atomic.load32_u", 0xFE16),
    ("i32.atomic.store", 0xFE17),
    ("i64.atomic.store", 0xFE18),
    ("i32.atomic.store8", 0xFE19),
    ("i32.atomic.store16", 0xFE1A),
    ("i64.atomic.store8", 0xFE1B),
    ("i64.atomic.store16", 0xFE1C),
    ("i64.atomic.store32", 0xFE1D),
    ("i32.atomic.rmw.add", 0xFE1E),
    ("i64.atomic.rmw.add", 0xFE1F),
    ("i32.atomic.rmw8.add_u", 0xFE20),
    ("i32.atomic.rmw16.add_u", 0xFE21),
    ("i64.atomic.rmw8.add_u", 0xFE22),
    ("i64.atomic.rmw16.add_u", 0xFE23),
    ("i64.atomic.rmw32.add_u", 0xFE24),
    ("i32.atomic.rmw.sub", 0xFE25),
    ("i64.atomic.rmw.sub", 0xFE26),
    ("i32.atomic.rmw8.sub_u", 0xFE27),
    ("i32.atomic.rmw16.sub_u", 0xFE28),
    ("i64.atomic.rmw8.sub_u", 0xFE29),
    ("i64.atomic.rmw16.sub_u", 0xFE2A),
    ("i64.atomic.rmw32.sub_u", 0xFE2B),
    ("i32.atomic.rmw.and", 0xFE2C),
    ("i64.atomic.rmw.and", 0xFE2D),
    ("i32.atomic.rmw8.and_u", 0xFE2E),
    ("i32.atomic.rmw16.and_u", 0xFE2F),
    ("i64.atomic.rmw8.and_u", 0xFE30),
    ("i64.atomic.rmw16.and_u", 0xFE31),
    ("i64.atomic.rmw32.and_u", 0xFE32),
    ("i32.atomic.rmw.or", 0xFE33),
    ("i64.atomic.rmw.or", 0xFE34),
    ("i32.atomic.rmw8.or_u", 0xFE35),
    ("i32.atomic.rmw16.or_u", 0xFE36),
    ("i64.atomic.rmw8.or_u", 0xFE37),
    ("i64.atomic.rmw16.or_u", 0xFE38),
    ("i64.atomic.rmw32.or_u", 0xFE39),
    ("i32.atomic.rmw.xor", 0xFE3A),
    ("i64.atomic.rmw.xor", 0xFE3B),
    ("i32.atomic.rmw8.xor_u", 0xFE3C),
    ("i32.atomic.rmw16.xor_u", 0xFE3D),
    ("i64.atomic.rmw8.xor_u", 0xFE3E),
    ("i64.atomic.rmw16.xor_u", 0xFE3F),
    ("i64.atomic.rmw32.xor_u", 0xFE40),
    ("i32.atomic.rmw.xchg", 0xFE41),
    ("i64.atomic.rmw.xchg", 0xFE42),
    ("i32.atomic.rmw8.xchg_u", 0xFE43),
    ("i32.atomic.rmw16.xchg_u", 0xFE44),
    ("i64.atomic.rmw8.xchg_u", 0xFE45),
    ("i64.atomic.rmw16.xchg_u", 0xFE46),
    ("i64.atomic.rmw32.xchg_u", 0xFE47),
    ("i32.atomic.rmw.cmpxchg", 0xFE48),
    ("i64.atomic.rmw.cmpxchg", 0xFE49),
    ("i32.atomic.rmw8.cmpxchg_u", 0xFE4A),
    ("i32.atomic.rmw16.cmpxchg_u", 0xFE4B),
    ("i64.atomic.rmw8.cmpxchg_u", 0xFE4C),
    ("i64.atomic.rmw16.cmpxchg_u", 0xFE4D),
    ("i64.atomic.rmw32.cmpxchg_u", 0xFE4E),
];

static INDEX: OnceLock<HashMap<&'static str, u32>> = OnceLock::new();

fn index() -> &'static HashMap<&'static str, u32> {
    INDEX.get_or_init(|| OPCODES.iter().copied().collect())
}

/// Look up the code for an operation name.
pub fn opcode(name: &str) -> Option<u32> {
    index().get(name).copied()
}

/// Split a prefixed code into its prefix byte and LEB128 sub-code.
/// Returns `None` for single-byte opcodes.
pub fn split_prefixed(code: u32) -> Option<(u8, u32)> {
    if code > 0xFF {
        Some(((code >> 8) as u8, code & 0xFF))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_duplicate_names_or_shared_codes() {
        assert_eq!(index().len(), OPCODES.len());
        let mut codes: Vec<u32> = OPCODES.iter().map(|(_, c)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), OPCODES.len());
    }

    #[test]
    fn lane_add_rows_are_distinct() {
        assert_eq!(opcode("i8x16.add"), Some(0xFD6E));
        assert_eq!(opcode("i16x8.add"), Some(0xFD8E));
        assert_eq!(opcode("i32x4.add"), Some(0xFDAE));
    }

    #[test]
    fn prefix_split() {
        assert_eq!(split_prefixed(0x6A), None);
        assert_eq!(split_prefixed(0xFC0A), Some((0xFC, 0x0A)));
        assert_eq!(split_prefixed(0xFDAE), Some((0xFD, 0xAE)));
        assert_eq!(split_prefixed(0xFE1E), Some((0xFE, 0x1E)));
    }

    #[test]
    fn core_spot_checks() {
        assert_eq!(opcode("i32.add"), Some(0x6A));
        assert_eq!(opcode("f32.mul"), Some(0x94));
        assert_eq!(opcode("memory.fill"), Some(0xFC0B));
        assert_eq!(opcode("atomic.fence"), Some(0xFE03));
        assert_eq!(opcode("spectral.flux"), None);
    }
}
